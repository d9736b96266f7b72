use medicare_core::{DeviceClass, Role};
use serde::{Deserialize, Serialize};

/// 字段缺失时写入 Prompt 的占位文字
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE_REPORTED: &str = "None reported";

/// 1. 请求载荷：调用方一次提问的全部输入，调用期间不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    /// 用户的问题原文
    pub question: String,

    /// 从文档中提取出的文本 (可以为空)
    #[serde(default)]
    pub context: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub device_class: DeviceClass,

    /// 可选的患者概况，只在完整模板中使用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_profile: Option<PatientProfile>,
}

impl PromptRequest {
    pub fn new(
        question: impl Into<String>,
        context: impl Into<String>,
        role: Role,
        device_class: DeviceClass,
    ) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
            role,
            device_class,
            patient_profile: None,
        }
    }

    pub fn with_patient_profile(mut self, profile: PatientProfile) -> Self {
        self.patient_profile = Some(profile);
        self
    }
}

/// 患者概况 (PatientProfile)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientProfile {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub weight_kg: Option<f32>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
}

impl PatientProfile {
    /// 渲染成 Prompt 中的单行描述，缺失项写 "Not specified" / "None reported"
    pub fn render(&self) -> String {
        let age = self.age.map_or_else(|| NOT_SPECIFIED.to_string(), |a| a.to_string());
        let gender = self
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(NOT_SPECIFIED);
        let weight = self
            .weight_kg
            .map_or_else(|| NOT_SPECIFIED.to_string(), |w| format!("{w}kg"));

        format!(
            "Age: {age}, Gender: {gender}, Weight: {weight}, Allergies: {}, Current Medications: {}",
            join_or_none(&self.allergies),
            join_or_none(&self.current_medications)
        )
    }
}

fn join_or_none(items: &[String]) -> String {
    let items: Vec<&str> = items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()).collect();
    if items.is_empty() {
        NONE_REPORTED.to_string()
    } else {
        items.join(", ")
    }
}

/// 2. 请求结果
///
/// 不变量：
/// * `success == true` 时 `text` 非空
/// * `fallback_used == Some(true)` 时 `success == true`，且 `error` 记录了主调用失败的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResult {
    pub text: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_used: Option<bool>,
}

impl AiResult {
    /// 远端模型正常返回。空文本视为失败，以维持不变量
    pub fn answered(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return Self::failed(medicare_core::AiError::EmptyResponse.to_string());
        }
        Self {
            text,
            success: true,
            error: None,
            fallback_used: None,
        }
    }

    /// 硬失败 (如配置错误)，调用方应提示用户
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            success: false,
            error: Some(error.into()),
            fallback_used: None,
        }
    }

    /// 降级回答：本地兜底文本 + 主调用失败原因
    pub fn degraded(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
            error: Some(reason.into()),
            fallback_used: Some(true),
        }
    }

    /// UI 需要把降级回答标记为 "离线"
    pub fn is_degraded(&self) -> bool {
        self.fallback_used == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answered_result_omits_optional_fields() {
        let value = serde_json::to_value(AiResult::answered("Metformin 500 mg")).unwrap();
        assert_eq!(value, json!({ "text": "Metformin 500 mg", "success": true }));
    }

    #[test]
    fn degraded_result_uses_camel_case_flag() {
        let result = AiResult::degraded("offline text", "Gemini API error (500): boom");
        assert!(result.is_degraded());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["fallbackUsed"], json!(true));
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["error"], json!("Gemini API error (500): boom"));
    }

    #[test]
    fn blank_answer_is_not_a_success() {
        let result = AiResult::answered("   ");
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn profile_renders_defaults_for_missing_fields() {
        assert_eq!(
            PatientProfile::default().render(),
            "Age: Not specified, Gender: Not specified, Weight: Not specified, Allergies: None reported, Current Medications: None reported"
        );

        let profile = PatientProfile {
            age: Some(67),
            gender: Some("female".into()),
            weight_kg: Some(72.5),
            allergies: vec!["penicillin".into(), " ".into()],
            current_medications: vec!["metformin 500 mg".into(), "lisinopril".into()],
        };
        assert_eq!(
            profile.render(),
            "Age: 67, Gender: female, Weight: 72.5kg, Allergies: penicillin, Current Medications: metformin 500 mg, lisinopril"
        );
    }

    #[test]
    fn request_profile_is_optional_on_the_wire() {
        let request: PromptRequest = serde_json::from_value(json!({
            "question": "Any interactions?",
            "patientProfile": { "age": 80, "currentMedications": ["warfarin"] }
        }))
        .unwrap();
        let profile = request.patient_profile.clone().unwrap();
        assert_eq!(profile.age, Some(80));
        assert_eq!(profile.current_medications, vec!["warfarin".to_string()]);

        let value = serde_json::to_value(PromptRequest::new("q", "", Role::Patient, DeviceClass::Mobile)).unwrap();
        assert!(value.get("patientProfile").is_none());
    }

    #[test]
    fn request_accepts_unknown_role_names() {
        let request: PromptRequest = serde_json::from_value(json!({
            "question": "hi",
            "role": "dentist",
            "deviceClass": "mobile"
        }))
        .unwrap();
        assert_eq!(request.role, Role::Unknown);
        assert_eq!(request.device_class, DeviceClass::Mobile);
        assert!(request.context.is_empty());
    }
}
