use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/pharmacist_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::Pharmacist,
    label: "Pharmacist",
    description: "Medication Specialists",
    features: &[
        "Drug interaction analysis",
        "Pharmaceutical guidance",
        "Dosing optimization",
        "Medication therapy management",
    ],
    guidance: include_str!("../../prompts/roles/pharmacist_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
