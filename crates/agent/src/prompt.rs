use crate::config::PromptConfig;
use crate::personas::directive_for;
use crate::types::{PatientProfile, PromptRequest};
use medicare_core::DeviceClass;

/// 上下文为空时写入 Prompt 的显式标记，避免远端模型收到空白
pub const NO_CONTEXT_MARKER: &str = "No additional context provided.";

/// 没有患者概况时写入 Prompt 的说明
pub const NO_PROFILE_MARKER: &str = "No specific patient profile provided - provide general medical guidance";

pub const CONTEXT_TOKEN: &str = "{context}";
pub const QUESTION_TOKEN: &str = "{question}";
pub const USER_TYPE_TOKEN: &str = "{user_type}";
pub const ROLE_GUIDANCE_TOKEN: &str = "{role_guidance}";
pub const PATIENT_PROFILE_TOKEN: &str = "{patient_profile}";

/// 按终端类型选模板，并填入上下文、问题、角色标签、角色指引与患者概况
///
/// 模板中没有的占位符直接忽略 (移动端模板不含患者概况)。
/// 纯函数：相同输入永远得到相同的字符串。
pub fn build_prompt(prompts: &PromptConfig, request: &PromptRequest) -> String {
    let directive = directive_for(request.role);
    let template = match request.device_class {
        DeviceClass::Mobile => &prompts.mobile_prompt,
        DeviceClass::Desktop => &prompts.full_prompt,
    };

    let profile = request
        .patient_profile
        .as_ref()
        .map_or_else(|| NO_PROFILE_MARKER.to_string(), PatientProfile::render);

    fill_template(
        template,
        &[
            (CONTEXT_TOKEN, effective_context(&request.context)),
            (QUESTION_TOKEN, request.question.as_str()),
            (USER_TYPE_TOKEN, directive.label),
            (ROLE_GUIDANCE_TOKEN, directive.guidance()),
            (PATIENT_PROFILE_TOKEN, profile.as_str()),
        ],
    )
}

/// 快速问答模板只接收问题本身
pub fn build_quick_prompt(prompts: &PromptConfig, question: &str) -> String {
    fill_template(&prompts.quick_answer_prompt, &[(QUESTION_TOKEN, question)])
}

fn effective_context(context: &str) -> &str {
    if context.trim().is_empty() {
        NO_CONTEXT_MARKER
    } else {
        context
    }
}

/// 单遍替换：已写入的用户文本不会被再次展开，
/// 即使其中恰好包含 `{question}` 之类的占位符
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use medicare_core::Role;
    use strum::IntoEnumIterator;

    const TOKENS: [&str; 5] = [
        CONTEXT_TOKEN,
        QUESTION_TOKEN,
        USER_TYPE_TOKEN,
        ROLE_GUIDANCE_TOKEN,
        PATIENT_PROFILE_TOKEN,
    ];

    #[test]
    fn prompt_contains_inputs_and_no_placeholders() {
        let prompts = PromptConfig::default();
        let pairs = [
            ("What is the dosing for metformin?", "Patient BP 120/80, HR 98"),
            ("hi", "hello"),
            ("Explain {braces} in text", "Lab: Na 138 mmol/L\nK 4.1"),
            ("Is 37.2 a fever?", "Temp 37.2 at 14:30 on 2024-03-12"),
        ];

        for role in Role::iter() {
            for device in [DeviceClass::Mobile, DeviceClass::Desktop] {
                for (question, context) in pairs {
                    let request = PromptRequest::new(question, context, role, device);
                    let prompt = build_prompt(&prompts, &request);
                    assert!(prompt.contains(question));
                    assert!(prompt.contains(context));
                    assert!(prompt.contains(directive_for(role).label));
                    assert!(prompt.contains(directive_for(role).guidance()));
                    for token in TOKENS {
                        assert!(!prompt.contains(token), "leftover {token} for {role}/{device}");
                    }
                }
            }
        }
    }

    #[test]
    fn empty_context_uses_marker() {
        let prompts = PromptConfig::default();
        for context in ["", "   \n\t"] {
            let request = PromptRequest::new("Any interactions?", context, Role::Pharmacist, DeviceClass::Desktop);
            assert!(build_prompt(&prompts, &request).contains(NO_CONTEXT_MARKER));
        }
    }

    #[test]
    fn device_class_selects_template() {
        let prompts = PromptConfig::default();
        let mobile = build_prompt(
            &prompts,
            &PromptRequest::new("q", "c", Role::Nurse, DeviceClass::Mobile),
        );
        let desktop = build_prompt(
            &prompts,
            &PromptRequest::new("q", "c", Role::Nurse, DeviceClass::Desktop),
        );
        assert!(mobile.contains("under 150 words"));
        assert!(!desktop.contains("under 150 words"));
        assert!(mobile.len() < desktop.len());
    }

    #[test]
    fn building_is_pure() {
        let prompts = PromptConfig::default();
        let request = PromptRequest::new("q", "c", Role::Family, DeviceClass::Desktop);
        assert_eq!(build_prompt(&prompts, &request), build_prompt(&prompts, &request));
    }

    #[test]
    fn user_text_is_not_expanded_twice() {
        let filled = fill_template("Q: {question} C: {context}", &[
            (QUESTION_TOKEN, "{context}"),
            (CONTEXT_TOKEN, "vitals"),
        ]);
        assert_eq!(filled, "Q: {context} C: vitals");
    }

    #[test]
    fn unknown_braces_are_kept() {
        let filled = fill_template("{a} {question} {", &[(QUESTION_TOKEN, "why")]);
        assert_eq!(filled, "{a} why {");
    }

    #[test]
    fn full_prompt_without_profile_asks_for_general_guidance() {
        let prompts = PromptConfig::default();
        let request = PromptRequest::new("Any interactions?", "warfarin 5 mg", Role::Pharmacist, DeviceClass::Desktop);
        assert!(build_prompt(&prompts, &request).contains(NO_PROFILE_MARKER));
    }

    #[test]
    fn full_prompt_includes_rendered_profile() {
        let prompts = PromptConfig::default();
        let profile = PatientProfile {
            age: Some(80),
            allergies: vec!["sulfa".into()],
            current_medications: vec!["warfarin".into()],
            ..PatientProfile::default()
        };
        let request = PromptRequest::new("Can I add aspirin?", "INR 2.4", Role::Pharmacist, DeviceClass::Desktop)
            .with_patient_profile(profile.clone());

        let prompt = build_prompt(&prompts, &request);
        assert!(prompt.contains(&profile.render()));
        assert!(prompt.contains("Age: 80, Gender: Not specified"));
        assert!(!prompt.contains(NO_PROFILE_MARKER));
        assert!(!prompt.contains(PATIENT_PROFILE_TOKEN));
    }

    #[test]
    fn mobile_prompt_stays_short_without_profile() {
        let prompts = PromptConfig::default();
        let request = PromptRequest::new("q", "c", Role::Patient, DeviceClass::Mobile)
            .with_patient_profile(PatientProfile::default());
        let prompt = build_prompt(&prompts, &request);
        assert!(!prompt.contains(NO_PROFILE_MARKER));
        assert!(!prompt.contains("Age:"));
    }

    #[test]
    fn quick_prompt_fills_question() {
        let prompt = build_quick_prompt(&PromptConfig::default(), "Max paracetamol dose?");
        assert!(prompt.contains("Max paracetamol dose?"));
        assert!(!prompt.contains(QUESTION_TOKEN));
    }
}
