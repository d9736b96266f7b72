use medicare_core::Role;

mod clinician;
mod family;
mod general;
mod nurse;
mod patient;
mod pharmacist;
mod researcher;

/// 角色指令 (RoleDirective)
///
/// 每个角色对应一份进程级常量配置：
/// * `label` - 注入 Prompt 的 `{user_type}`
/// * `guidance` - 注入 Prompt 的 `{role_guidance}`，引导远端模型的语气与关注点
/// * `fallback` - 远端不可用时的本地兜底模板
///
/// 另外携带角色选择界面需要的简介与特性列表。
pub struct RoleDirective {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    guidance: &'static str,
    fallback: fn(&str, &str) -> String,
}

impl std::fmt::Debug for RoleDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleDirective")
            .field("role", &self.role)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl RoleDirective {
    pub fn guidance(&self) -> &'static str {
        self.guidance.trim()
    }

    /// 渲染该角色的兜底回答 (纯模板，无推理，结果确定)
    pub fn fallback(&self, question: &str, context: &str) -> String {
        (self.fallback)(question, context)
    }
}

/// 查表：未知角色返回通用指令，永不失败
pub fn directive_for(role: Role) -> &'static RoleDirective {
    match role {
        Role::HealthcareProfessional => &clinician::DIRECTIVE,
        Role::Nurse => &nurse::DIRECTIVE,
        Role::Patient => &patient::DIRECTIVE,
        Role::Family => &family::DIRECTIVE,
        Role::Researcher => &researcher::DIRECTIVE,
        Role::Pharmacist => &pharmacist::DIRECTIVE,
        Role::Unknown => &general::DIRECTIVE,
    }
}

/// 按字符串查表，便于直接接收前端传来的角色名
pub fn directive_for_name(raw: &str) -> &'static RoleDirective {
    directive_for(Role::parse_lossy(raw))
}

/// 角色选择界面的展示顺序 (不含通用指令)
pub fn all_directives() -> [&'static RoleDirective; 6] {
    [
        &clinician::DIRECTIVE,
        &nurse::DIRECTIVE,
        &patient::DIRECTIVE,
        &family::DIRECTIVE,
        &researcher::DIRECTIVE,
        &pharmacist::DIRECTIVE,
    ]
}

/// 把问题压成单行引用，模板里的 `{{focus}}` 由它替换
fn render_focus(template: &str, question: &str) -> String {
    let focus = question.split_whitespace().collect::<Vec<_>>().join(" ");
    let focus = if focus.is_empty() {
        "your question".to_string()
    } else {
        focus
    };
    template.trim().replace("{{focus}}", &focus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_role_resolves() {
        for role in Role::iter() {
            let directive = directive_for(role);
            assert_eq!(directive.role, role);
            assert!(!directive.label.is_empty());
            assert!(!directive.guidance().is_empty());
            assert!(!directive.features.is_empty());
        }
    }

    #[test]
    fn unknown_names_use_general_directive() {
        assert_eq!(directive_for_name("veterinarian").role, Role::Unknown);
        assert_eq!(directive_for_name("").label, general::DIRECTIVE.label);
        assert_eq!(directive_for_name("nurse").role, Role::Nurse);
    }

    #[test]
    fn fallbacks_quote_the_question_and_are_deterministic() {
        for role in Role::iter() {
            let directive = directive_for(role);
            let a = directive.fallback("What is the dosing\nfor metformin?", "ctx");
            let b = directive.fallback("What is the dosing\nfor metformin?", "ctx");
            assert_eq!(a, b);
            assert!(a.contains("\"What is the dosing for metformin?\""), "{a}");
            assert!(a.contains("What we know"));
            assert!(a.contains("Next steps"));
            assert!(a.contains("Safety reminders"));
            assert!(!a.contains("{{focus}}"));
        }
    }

    #[test]
    fn blank_question_gets_generic_focus() {
        let text = directive_for(Role::Patient).fallback("   ", "");
        assert!(text.contains("\"your question\""));
    }

    #[test]
    fn picker_lists_each_concrete_role_once() {
        let roles: Vec<Role> = all_directives().iter().map(|d| d.role).collect();
        assert_eq!(roles.len(), 6);
        assert!(!roles.contains(&Role::Unknown));
    }
}
