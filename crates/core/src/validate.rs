pub mod validate {
    /// 核心校验宏：如果条件为假，则返回格式化的错误信息
    #[macro_export]
    macro_rules! ensure_that {
        ($cond:expr, $($arg:tt)+) => {
            if !($cond) {
                return Err(::anyhow::anyhow!($($arg)+));
            }
        };
    }

    /// 校验字符串、Vec 等集合不为空 (字符串会先 trim)
    #[macro_export]
    macro_rules! ensure_not_blank {
        ($text:expr, $($arg:tt)+) => {
            if $text.trim().is_empty() {
                return Err(::anyhow::anyhow!($($arg)+));
            }
        };
    }

    /// 校验数值在范围内 (包含边界 [min, max])
    #[macro_export]
    macro_rules! ensure_range {
        ($val:expr, $min:expr, $max:expr, $($arg:tt)+) => {
            if $val < $min || $val > $max {
                return Err(::anyhow::anyhow!($($arg)+));
            }
        };
    }
}
