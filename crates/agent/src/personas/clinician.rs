use super::{render_focus, RoleDirective};
use medicare_core::Role;

const FALLBACK_TEMPLATE: &str = include_str!("../../prompts/roles/healthcare_professional_fallback.md");

pub(super) static DIRECTIVE: RoleDirective = RoleDirective {
    role: Role::HealthcareProfessional,
    label: "Healthcare Professional",
    description: "Physicians, Specialists, Residents",
    features: &[
        "Advanced clinical analysis",
        "Detailed medication protocols",
        "ICU/ER decision support",
        "Research evidence integration",
    ],
    guidance: include_str!("../../prompts/roles/healthcare_professional_guidance.md"),
    fallback: render,
};

fn render(question: &str, _context: &str) -> String {
    render_focus(FALLBACK_TEMPLATE, question)
}
