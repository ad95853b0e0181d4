//! User-facing copy for reason tags.
//!
//! The mapping is an exhaustive `match`, so adding a tag without copy fails to compile.

use serde::Serialize;

use super::domain::ReasonTag;

/// How strongly a tag should be surfaced to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSeverity {
    High,
    Medium,
    Low,
}

/// Localized label, description, and follow-up questions for a reason tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonTagCopy {
    pub label: &'static str,
    pub description: &'static str,
    pub questions: [&'static str; 2],
}

impl ReasonTag {
    pub fn severity(self) -> TagSeverity {
        match self {
            ReasonTag::HighPartPrice | ReasonTag::HighLabor => TagSeverity::High,
            ReasonTag::DupLabor | ReasonTag::UnclearItem => TagSeverity::Medium,
            ReasonTag::MarketVariance => TagSeverity::Low,
        }
    }

    pub fn copy(self) -> ReasonTagCopy {
        match self {
            ReasonTag::HighPartPrice => ReasonTagCopy {
                label: "부품비 높음",
                description: "이 항목의 부품비가 시장 평균보다 높게 책정되어 있습니다.",
                questions: [
                    "사용하시는 부품이 OEM인지, 순정인지 확인해보세요.",
                    "같은 부품으로 다른 정비소에서도 견적을 받아보시는 것도 좋습니다.",
                ],
            },
            ReasonTag::HighLabor => ReasonTagCopy {
                label: "공임 높음",
                description: "이 작업의 공임이 일반적인 범위보다 높을 수 있습니다.",
                questions: [
                    "작업 시간이 얼마나 걸리는지 물어보세요.",
                    "공임에 포함된 작업 범위가 무엇인지 확인해보세요.",
                ],
            },
            ReasonTag::DupLabor => ReasonTagCopy {
                label: "공임 중복 의심",
                description: "다른 항목과 작업이 겹쳐 공임이 중복 청구될 수 있습니다.",
                questions: [
                    "이 작업들을 함께 할 때 공임을 묶어서 할인해 드릴 수 있는지 여쭤보세요.",
                    "어떤 부분의 분해·조립이 포함되어 있는지 설명해달라고 하세요.",
                ],
            },
            ReasonTag::UnclearItem => ReasonTagCopy {
                label: "항목 내용 불분명",
                description: "이 항목이 구체적으로 어떤 작업인지 확인이 필요합니다.",
                questions: [
                    "이 항목에 포함된 작업 내용을 구체적으로 설명해달라고 하세요.",
                    "영수증이나 작업 명세서를 요청해보세요.",
                ],
            },
            ReasonTag::MarketVariance => ReasonTagCopy {
                label: "가격 편차 있음",
                description: "이 항목은 지역이나 차종에 따라 가격 차이가 클 수 있습니다.",
                questions: [
                    "차량 연식과 모델에 따라 달라지는 이유가 있는지 물어보세요.",
                    "인근 다른 정비소와 비교해보는 것도 방법입니다.",
                ],
            },
        }
    }
}

/// Serializable copy entry for API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonTagView {
    pub tag: ReasonTag,
    pub severity: TagSeverity,
    #[serde(flatten)]
    pub copy: ReasonTagCopy,
}

impl From<ReasonTag> for ReasonTagView {
    fn from(tag: ReasonTag) -> Self {
        Self {
            tag,
            severity: tag.severity(),
            copy: tag.copy(),
        }
    }
}

pub fn reason_tag_catalog() -> Vec<ReasonTagView> {
    ReasonTag::all().into_iter().map(ReasonTagView::from).collect()
}
