use crate::domain::models::{IncomeSource, IncomeSourceWithEntries};
use shared::{IncomeEntryDto, IncomeSourceDto, IncomeSourceSummaryDto};

pub fn to_dto(source: IncomeSourceWithEntries) -> IncomeSourceDto {
    IncomeSourceDto {
        id: source.source.id,
        description: source.source.description,
        category_id: source.source.category_id.unwrap_or_default(),
        income_entries: source
            .entries
            .into_iter()
            .map(|entry| IncomeEntryDto {
                amount: entry.amount.unwrap_or(0.0),
                date: entry.date,
            })
            .collect(),
    }
}

pub fn to_summary_dto(source: IncomeSource) -> IncomeSourceSummaryDto {
    IncomeSourceSummaryDto {
        id: source.id,
        name: source.name,
        description: source.description,
        category_id: source.category_id,
        amount: source.amount,
        date: source.date,
    }
}
