use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/family_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::Family,
    label: "Family Member",
    description: "Supporting patient care",
    features: &[
        "Family-friendly information",
        "Caregiver guidance",
        "Support resources",
        "Communication help",
    ],
    guidance: include_str!("../../prompts/roles/family_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
