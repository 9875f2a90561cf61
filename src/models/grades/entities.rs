//! 成绩实体与评分计算
//!
//! 等级和绩点永远由分数推导，禁止由调用方直接指定。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩等级（细粒度 GPA 方案）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum GradeLetter {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl GradeLetter {
    /// 等级排序权重，F 最低
    pub fn rank(&self) -> u8 {
        match self {
            GradeLetter::F => 0,
            GradeLetter::D => 1,
            GradeLetter::CMinus => 2,
            GradeLetter::C => 3,
            GradeLetter::CPlus => 4,
            GradeLetter::BMinus => 5,
            GradeLetter::B => 6,
            GradeLetter::BPlus => 7,
            GradeLetter::AMinus => 8,
            GradeLetter::A => 9,
            GradeLetter::APlus => 10,
        }
    }

    /// 是否及格（仅 F 为不及格）
    pub fn is_passing(&self) -> bool {
        !matches!(self, GradeLetter::F)
    }
}

impl std::fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GradeLetter::APlus => "A+",
            GradeLetter::A => "A",
            GradeLetter::AMinus => "A-",
            GradeLetter::BPlus => "B+",
            GradeLetter::B => "B",
            GradeLetter::BMinus => "B-",
            GradeLetter::CPlus => "C+",
            GradeLetter::C => "C",
            GradeLetter::CMinus => "C-",
            GradeLetter::D => "D",
            GradeLetter::F => "F",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for GradeLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(GradeLetter::APlus),
            "A" => Ok(GradeLetter::A),
            "A-" => Ok(GradeLetter::AMinus),
            "B+" => Ok(GradeLetter::BPlus),
            "B" => Ok(GradeLetter::B),
            "B-" => Ok(GradeLetter::BMinus),
            "C+" => Ok(GradeLetter::CPlus),
            "C" => Ok(GradeLetter::C),
            "C-" => Ok(GradeLetter::CMinus),
            "D" => Ok(GradeLetter::D),
            "F" => Ok(GradeLetter::F),
            _ => Err(format!("Invalid grade letter: {s}")),
        }
    }
}

/// 根据分数计算等级和绩点
///
/// 阈值从高到低匹配，下界闭区间。调用方必须保证 marks 在 [0, 100] 内，
/// 范围校验在存储层写入前完成。
pub fn compute_grade(marks: f64) -> (GradeLetter, f64) {
    if marks >= 90.0 {
        (GradeLetter::APlus, 4.0)
    } else if marks >= 85.0 {
        (GradeLetter::A, 3.7)
    } else if marks >= 80.0 {
        (GradeLetter::AMinus, 3.3)
    } else if marks >= 75.0 {
        (GradeLetter::BPlus, 3.0)
    } else if marks >= 70.0 {
        (GradeLetter::B, 2.7)
    } else if marks >= 65.0 {
        (GradeLetter::BMinus, 2.3)
    } else if marks >= 60.0 {
        (GradeLetter::CPlus, 2.0)
    } else if marks >= 55.0 {
        (GradeLetter::C, 1.7)
    } else if marks >= 50.0 {
        (GradeLetter::CMinus, 1.3)
    } else if marks >= 45.0 {
        (GradeLetter::D, 1.0)
    } else {
        (GradeLetter::F, 0.0)
    }
}

/// 计算发布时间的下一个取值
///
/// published_at 只在首次发布时写入一次，之后不再清除或改写。
pub fn next_published_at(current: Option<i64>, is_published: bool, now: i64) -> Option<i64> {
    if is_published && current.is_none() {
        Some(now)
    } else {
        current
    }
}

// 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum Term {
    #[serde(rename = "First Term")]
    First,
    #[serde(rename = "Second Term")]
    Second,
    #[serde(rename = "Third Term")]
    Third,
    #[serde(rename = "Final")]
    Final,
}

impl Term {
    pub const FIRST: &'static str = "First Term";
    pub const SECOND: &'static str = "Second Term";
    pub const THIRD: &'static str = "Third Term";
    pub const FINAL: &'static str = "Final";
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Term>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的学期: '{s}'. 支持: First Term, Second Term, Third Term, Final"
            ))
        })
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::First => write!(f, "{}", Term::FIRST),
            Term::Second => write!(f, "{}", Term::SECOND),
            Term::Third => write!(f, "{}", Term::THIRD),
            Term::Final => write!(f, "{}", Term::FINAL),
        }
    }
}

impl std::str::FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Term::FIRST => Ok(Term::First),
            Term::SECOND => Ok(Term::Second),
            Term::THIRD => Ok(Term::Third),
            Term::FINAL => Ok(Term::Final),
            _ => Err(format!("Invalid term: {s}")),
        }
    }
}

// 考试类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum ExamType {
    Quiz,
    Assignment,
    Midterm,
    Final,
    Project,
}

impl Default for ExamType {
    fn default() -> Self {
        ExamType::Final
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamType::Quiz => "Quiz",
            ExamType::Assignment => "Assignment",
            ExamType::Midterm => "Midterm",
            ExamType::Final => "Final",
            ExamType::Project => "Project",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Quiz" => Ok(ExamType::Quiz),
            "Assignment" => Ok(ExamType::Assignment),
            "Midterm" => Ok(ExamType::Midterm),
            "Final" => Ok(ExamType::Final),
            "Project" => Ok(ExamType::Project),
            _ => Err(format!("Invalid exam type: {s}")),
        }
    }
}

// 关联展示信息（引用，不内嵌完整档案）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentRef {
    pub id: i64,
    pub student_no: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SubjectRef {
    pub id: i64,
    pub subject_code: String,
    pub subject_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TeacherRef {
    pub id: i64,
    pub teacher_no: String,
    pub display_name: String,
}

// 成绩记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student: StudentRef,
    pub subject: SubjectRef,
    pub teacher: TeacherRef,
    pub marks: f64,
    pub max_marks: f64,
    pub grade: GradeLetter,
    pub gpa: f64,
    pub term: Term,
    pub academic_year: String,
    pub exam_type: ExamType,
    pub comments: Option<String>,
    pub is_published: bool,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Grade {
    /// 百分比得分
    pub fn percentage(&self) -> f64 {
        self.marks / self.max_marks * 100.0
    }

    /// 及格状态
    pub fn status(&self) -> &'static str {
        if self.grade.is_passing() { "Pass" } else { "Fail" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(compute_grade(90.0), (GradeLetter::APlus, 4.0));
        assert_eq!(compute_grade(85.0), (GradeLetter::A, 3.7));
        assert_eq!(compute_grade(80.0), (GradeLetter::AMinus, 3.3));
        assert_eq!(compute_grade(75.0), (GradeLetter::BPlus, 3.0));
        assert_eq!(compute_grade(70.0), (GradeLetter::B, 2.7));
        assert_eq!(compute_grade(65.0), (GradeLetter::BMinus, 2.3));
        assert_eq!(compute_grade(60.0), (GradeLetter::CPlus, 2.0));
        assert_eq!(compute_grade(55.0), (GradeLetter::C, 1.7));
        assert_eq!(compute_grade(50.0), (GradeLetter::CMinus, 1.3));
        assert_eq!(compute_grade(45.0), (GradeLetter::D, 1.0));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(compute_grade(100.0), (GradeLetter::APlus, 4.0));
        assert_eq!(compute_grade(44.999), (GradeLetter::F, 0.0));
        assert_eq!(compute_grade(0.0), (GradeLetter::F, 0.0));
    }

    #[test]
    fn test_monotonic_in_marks() {
        let mut prev_rank = 0u8;
        let mut prev_gpa = 0.0f64;
        for i in 0..=1000 {
            let marks = i as f64 / 10.0;
            let (letter, gpa) = compute_grade(marks);
            assert!(letter.rank() >= prev_rank, "letter rank dropped at {marks}");
            assert!(gpa >= prev_gpa, "gpa dropped at {marks}");
            prev_rank = letter.rank();
            prev_gpa = gpa;
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let first = compute_grade(87.5);
        let second = compute_grade(87.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pass_fail() {
        assert!(!compute_grade(44.0).0.is_passing());
        assert!(compute_grade(45.0).0.is_passing());
    }

    #[test]
    fn test_published_at_set_once() {
        // 首次发布写入时间戳
        assert_eq!(next_published_at(None, true, 1000), Some(1000));
        // 再次保存已发布记录不改写
        assert_eq!(next_published_at(Some(1000), true, 2000), Some(1000));
        // 取消发布不清除
        assert_eq!(next_published_at(Some(1000), false, 2000), Some(1000));
        // 未发布保持为空
        assert_eq!(next_published_at(None, false, 2000), None);
    }

    #[test]
    fn test_percentage_and_status() {
        let (letter, gpa) = compute_grade(40.0);
        let grade = Grade {
            id: 1,
            student: StudentRef {
                id: 1,
                student_no: "STU001".into(),
                display_name: "张三".into(),
            },
            subject: SubjectRef {
                id: 1,
                subject_code: "MATH101".into(),
                subject_name: "数学".into(),
            },
            teacher: TeacherRef {
                id: 1,
                teacher_no: "TCH001".into(),
                display_name: "李老师".into(),
            },
            marks: 40.0,
            max_marks: 50.0,
            grade: letter,
            gpa,
            term: Term::First,
            academic_year: "2024-2025".into(),
            exam_type: ExamType::Final,
            comments: None,
            is_published: false,
            published_at: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        };
        // 满分可按记录覆盖，百分比随之变化
        assert_eq!(grade.percentage(), 80.0);
        // 及格状态只由等级字母推导
        assert_eq!(grade.status(), "Fail");
    }

    #[test]
    fn test_term_round_trip() {
        for term in [Term::First, Term::Second, Term::Third, Term::Final] {
            assert_eq!(term.to_string().parse::<Term>().unwrap(), term);
        }
        assert!("Fourth Term".parse::<Term>().is_err());
    }
}
