//! 考试结果（简化评分方案）
//!
//! 与 `grades` 模块的 GPA 细粒度方案相互独立，是历史遗留的
//! 平时分+考试分总分制，二者不可合并。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 简化方案的等级，只有 A-F 五档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub enum ExamLetter {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for ExamLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamLetter::A => "A",
            ExamLetter::B => "B",
            ExamLetter::C => "C",
            ExamLetter::D => "D",
            ExamLetter::F => "F",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ExamLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ExamLetter::A),
            "B" => Ok(ExamLetter::B),
            "C" => Ok(ExamLetter::C),
            "D" => Ok(ExamLetter::D),
            "F" => Ok(ExamLetter::F),
            _ => Err(format!("Invalid exam letter: {s}")),
        }
    }
}

/// 总分（平时分 + 考试分）按粗粒度阈值映射等级
pub fn exam_grade(total: f64) -> ExamLetter {
    if total >= 70.0 {
        ExamLetter::A
    } else if total >= 60.0 {
        ExamLetter::B
    } else if total >= 50.0 {
        ExamLetter::C
    } else if total >= 45.0 {
        ExamLetter::D
    } else {
        ExamLetter::F
    }
}

// 考试结果记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamResult {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    // 学年会话，形如 "2024-2025"
    pub session: String,
    pub term: String,
    // 平时分
    pub ca: f64,
    // 考试分
    pub exam: f64,
    pub total: f64,
    pub grade: ExamLetter,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_grade_boundaries() {
        assert_eq!(exam_grade(70.0), ExamLetter::A);
        assert_eq!(exam_grade(69.999), ExamLetter::B);
        assert_eq!(exam_grade(60.0), ExamLetter::B);
        assert_eq!(exam_grade(50.0), ExamLetter::C);
        assert_eq!(exam_grade(45.0), ExamLetter::D);
        assert_eq!(exam_grade(44.999), ExamLetter::F);
        assert_eq!(exam_grade(0.0), ExamLetter::F);
        assert_eq!(exam_grade(100.0), ExamLetter::A);
    }

    #[test]
    fn test_schemes_not_unified() {
        // 同一分数在两套方案下产生不同等级，必须保持独立
        use crate::models::grades::entities::{GradeLetter, compute_grade};
        assert_eq!(exam_grade(70.0), ExamLetter::A);
        assert_eq!(compute_grade(70.0).0, GradeLetter::B);
    }
}
