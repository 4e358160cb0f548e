//! 大数字缩写，如参数量 `7000000000 -> "7B"`

use std::str::FromStr;

/// 单位阶梯，每级 1000 倍
const UNITS: [&str; 5] = ["", "K", "M", "B", "T"];

/// 取整方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// 向零截断
    #[default]
    Floor,
    /// 四舍五入（.5 远离零）
    Round,
}

impl FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "floor" => Ok(Rounding::Floor),
            "round" => Ok(Rounding::Round),
            other => Err(format!("unknown rounding mode: {}", other)),
        }
    }
}

/// 将数字缩写为 `K/M/B/T` 形式
///
/// 小于 1000 的值不带单位；超过 T 的值仍以 T 为单位（如 `"1500T"`）。
/// 负数不会被除（比较 `>= 1000` 不成立），按原值取整输出。
pub fn abbreviate(value: f64, mode: Rounding) -> String {
    let mut reduced = value;
    let mut unit = 0;
    while reduced >= 1000.0 && unit < UNITS.len() - 1 {
        reduced /= 1000.0;
        unit += 1;
    }

    let rounded = match mode {
        Rounding::Floor => reduced.trunc(),
        Rounding::Round => reduced.round(),
    };

    // f64 的 Display 对整数值不带小数部分；-0.0 单独归一成 0
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}{}", rounded, UNITS[unit])
}
