use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/nurse_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::Nurse,
    label: "Nurse/Nurse Practitioner",
    description: "RN, NP, Clinical Nurses",
    features: &[
        "Nursing assessment tools",
        "Medication administration",
        "Patient monitoring protocols",
        "Care plan development",
    ],
    guidance: include_str!("../../prompts/roles/nurse_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
