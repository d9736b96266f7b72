use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/patient_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::Patient,
    label: "Patient",
    description: "Seeking medical information",
    features: &[
        "Simplified explanations",
        "Treatment understanding",
        "Medication guidance",
        "Recovery support",
    ],
    guidance: include_str!("../../prompts/roles/patient_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
