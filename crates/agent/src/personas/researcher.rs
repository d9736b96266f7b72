use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/researcher_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::Researcher,
    label: "Medical Researcher",
    description: "Research & Academic",
    features: &[
        "Literature analysis",
        "Study methodology",
        "Statistical interpretation",
        "Research protocols",
    ],
    guidance: include_str!("../../prompts/roles/researcher_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
