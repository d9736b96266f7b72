use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/general_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::Unknown,
    label: "General User",
    description: "Role not specified",
    features: &[
        "General medical information",
        "Plain-language explanations",
    ],
    guidance: include_str!("../../prompts/roles/general_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
