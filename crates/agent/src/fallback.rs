use crate::personas::directive_for;
use crate::relevance::assess;
use medicare_core::Role;

const LIMITED_CONTENT_TEMPLATE: &str = include_str!("../prompts/limited_content.md");

/// "内容不足" 固定提示
pub fn limited_content_message() -> &'static str {
    LIMITED_CONTENT_TEMPLATE.trim()
}

/// 本地兜底回答 (远端不可用时使用)
///
/// 1. 先跑相关性规则：上下文很短且没有任何医疗信号时，返回 "内容不足" 提示，
///    不根据非医疗输入编造医疗内容。
/// 2. 否则交给角色指令的兜底模板渲染。
///
/// 结果只取决于 (question, context, role)，没有随机性，也没有隐藏状态。
pub fn fallback_response(question: &str, context: &str, role: Role) -> String {
    let assessment = assess(question, context);
    if assessment.is_limited_content() {
        tracing::debug!(
            context_chars = assessment.context_chars,
            "No medical signal in short context, using limited-content notice"
        );
        return limited_content_message().to_string();
    }

    tracing::debug!(%role, matched = ?assessment.matched, "Rendering role fallback");
    directive_for(role).fallback(question, context)
}
