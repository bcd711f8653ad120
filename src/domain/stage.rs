//! The ordered redevelopment pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectStage {
    PromotionCommittee,
    ZoneDesignation,
    AssociationApproval,
    ProjectImplementationApproval,
    ManagementDisposalPlan,
    ConstructionStart,
    Completion,
}

impl ProjectStage {
    pub const ALL: [ProjectStage; 7] = [
        ProjectStage::PromotionCommittee,
        ProjectStage::ZoneDesignation,
        ProjectStage::AssociationApproval,
        ProjectStage::ProjectImplementationApproval,
        ProjectStage::ManagementDisposalPlan,
        ProjectStage::ConstructionStart,
        ProjectStage::Completion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PromotionCommittee => "추진위원회 구성",
            Self::ZoneDesignation => "정비구역 지정",
            Self::AssociationApproval => "조합설립인가",
            Self::ProjectImplementationApproval => "사업시행인가",
            Self::ManagementDisposalPlan => "관리처분계획 수립",
            Self::ConstructionStart => "착공",
            Self::Completion => "준공",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PromotionCommittee => {
                "정비사업 추진을 위한 주민 동의를 얻어 추진위원회를 구성하는 단계입니다."
            }
            Self::ZoneDesignation => "도시계획위원회의 심의를 거쳐 정비구역으로 지정됩니다.",
            Self::AssociationApproval => {
                "토지등소유자의 동의를 받아 조합을 설립하고 인가를 받습니다."
            }
            Self::ProjectImplementationApproval => {
                "사업계획서를 작성하여 인가받는 단계로, 건축 및 교통 심의가 포함됩니다."
            }
            Self::ManagementDisposalPlan => {
                "분양 신청 후 조합원의 자산과 권리를 평가하고 분양 계획을 확정합니다."
            }
            Self::ConstructionStart => "기존 건축물을 철거하고 본격적인 공사가 시작됩니다.",
            Self::Completion => "공사가 완료되어 새로운 건물이 완성되고 입주를 준비합니다.",
        }
    }

    /// Zero-based position in the pipeline.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Share of the pipeline reached once this stage is under way, in percent.
    pub fn progress_percent(&self) -> u8 {
        let reached = (self.index() + 1) as f64 / Self::ALL.len() as f64;
        (reached * 100.0).round() as u8
    }

    /// Resolves a stage name, accepting the approval-era alias for the
    /// management disposal stage.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = match name.trim() {
            "관리처분인가" => "관리처분계획 수립",
            other => other,
        };
        Self::ALL.into_iter().find(|stage| stage.name() == name)
    }
}

impl fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectStage {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValuationError::UnknownStage(s.to_string()))
    }
}

/// Progress for a free-form stage name; unknown names report zero.
pub fn progress_for(name: &str) -> u8 {
    ProjectStage::from_name(name)
        .map(|stage| stage.progress_percent())
        .unwrap_or(0)
}
