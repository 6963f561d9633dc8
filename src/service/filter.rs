use crate::models::{FilterCriteria, SalesLineItem, ScopedDataset};

/// 按条件过滤数据集，返回只读视图
///
/// 不修改输入；结果为空是正常情况。
pub fn filter<'a>(dataset: &'a [SalesLineItem], criteria: &FilterCriteria) -> ScopedDataset<'a> {
    let rows: Vec<&SalesLineItem> = dataset.iter().filter(|item| criteria.matches(item)).collect();
    tracing::debug!(
        "Filter {:?}: {} of {} rows in scope",
        criteria,
        rows.len(),
        dataset.len()
    );
    ScopedDataset::new(criteria.clone(), rows)
}

/// 在已有视图上再次过滤
pub fn refine<'a>(scope: &ScopedDataset<'a>, criteria: &FilterCriteria) -> ScopedDataset<'a> {
    let rows = scope.iter().filter(|item| criteria.matches(item)).collect();
    ScopedDataset::new(criteria.clone(), rows)
}
