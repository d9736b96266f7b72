// crates/core/src/enums.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// 用户角色
///
/// 线上名称为 snake_case (如 "healthcare_professional")。
/// 任何无法识别的字符串都会落到 `Unknown`，解析永远不会失败。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, Default,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    HealthcareProfessional,
    Nurse,
    Patient,
    Family,
    Researcher,
    Pharmacist,
    #[default]
    Unknown,
}

impl Role {
    /// 宽松解析：忽略首尾空白与大小写，未知值返回 `Role::Unknown`
    pub fn parse_lossy(raw: &str) -> Self {
        raw.trim().to_ascii_lowercase().parse().unwrap_or(Role::Unknown)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse_lossy(&raw)
    }
}

/// 视口宽度低于该值即视为移动端 (px)
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// 终端类型，决定使用精简还是完整的 Prompt 模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn from_mobile_hint(is_mobile: bool) -> Self {
        if is_mobile {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn from_viewport_width(width_px: u32) -> Self {
        Self::from_mobile_hint(width_px < MOBILE_BREAKPOINT_PX)
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

/// 聊天消息的发言方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn role_wire_names_round_trip() {
        for role in Role::iter() {
            assert_eq!(Role::parse_lossy(&role.to_string()), role);
        }
        assert_eq!(Role::HealthcareProfessional.to_string(), "healthcare_professional");
    }

    #[test]
    fn unknown_role_strings_never_fail() {
        assert_eq!(Role::parse_lossy(""), Role::Unknown);
        assert_eq!(Role::parse_lossy("surgeon"), Role::Unknown);
        assert_eq!(Role::parse_lossy("  NURSE "), Role::Nurse);

        let role: Role = serde_json::from_str("\"astronaut\"").unwrap();
        assert_eq!(role, Role::Unknown);
        assert_eq!(serde_json::to_string(&Role::Pharmacist).unwrap(), "\"pharmacist\"");
    }

    #[test]
    fn viewport_breakpoint() {
        assert_eq!(DeviceClass::from_viewport_width(767), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport_width(768), DeviceClass::Desktop);
        assert!(DeviceClass::from_mobile_hint(true).is_mobile());
    }
}
