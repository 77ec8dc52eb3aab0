/// Transformation stage
///
/// Pure functions over the extracted table: experience buckets, type counts,
/// per-type stat means and the top-N ranking. Functions that only read rows
/// accept anything that is `AsRef<Row>`, so they work on plain and
/// categorized tables alike.
use crate::types::{CategorizedRow, Category, PipelineOutput, Row, TypeCount, TypeStats};
use log::{debug, info};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Default number of rows kept by `top_n`
pub const DEFAULT_TOP_N: usize = 5;

/// Attach an experience category to every row
pub fn categorize(table: Vec<Row>) -> Vec<CategorizedRow> {
    info!("Categorizing base experience for {} rows", table.len());
    table
        .into_iter()
        .map(|row| {
            let category = Category::from_experience(row.base_experience);
            CategorizedRow { row, category }
        })
        .collect()
}

/// One `(row, type)` pair per element of each row's type list
fn explode<R: AsRef<Row>>(table: &[R]) -> impl Iterator<Item = (&Row, &str)> {
    table.iter().flat_map(|r| {
        let row = r.as_ref();
        row.types.iter().map(move |t| (row, t.as_str()))
    })
}

/// Count rows per type after exploding the type lists
///
/// Ordered by descending count; equal counts keep first-seen order.
pub fn count_by_type<R: AsRef<Row>>(table: &[R]) -> Vec<TypeCount> {
    info!("Counting rows by type");
    let mut counts: Vec<TypeCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (_, type_name) in explode(table) {
        match index.get(type_name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(type_name, counts.len());
                counts.push(TypeCount { type_name: type_name.to_string(), count: 1 });
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by_key(|c| Reverse(c.count));
    debug!("Type counts: {:?}", counts);
    counts
}

/// Running sum over the rows where a stat is present
#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: i64,
    n: u32,
}

impl MeanAcc {
    fn add(&mut self, value: Option<i64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.n > 0).then(|| round2(self.sum as f64 / f64::from(self.n)))
    }
}

/// Round to two decimals, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean HP/Attack/Defense per type, each over the rows carrying that stat
///
/// Ordered by type name. A stat no row of the type carries is `None`.
pub fn type_statistics<R: AsRef<Row>>(table: &[R]) -> Vec<TypeStats> {
    info!("Calculating type statistics");
    let mut groups: BTreeMap<&str, [MeanAcc; 3]> = BTreeMap::new();

    for (row, type_name) in explode(table) {
        let [hp, attack, defense] = groups.entry(type_name).or_default();
        hp.add(row.hp);
        attack.add(row.attack);
        defense.add(row.defense);
    }

    let stats: Vec<TypeStats> = groups
        .into_iter()
        .map(|(type_name, [hp, attack, defense])| TypeStats {
            type_name: type_name.to_string(),
            hp: hp.mean(),
            attack: attack.mean(),
            defense: defense.mean(),
        })
        .collect();
    debug!("Type statistics: {:?}", stats);
    stats
}

/// The `n` rows with the highest base experience, ties in table order
pub fn top_n(table: &[CategorizedRow], n: usize) -> Vec<CategorizedRow> {
    info!("Finding top {} by base experience", n);
    let mut ranked: Vec<&CategorizedRow> = table.iter().collect();
    ranked.sort_by_key(|r| Reverse(r.row.base_experience));
    let top: Vec<CategorizedRow> = ranked.into_iter().take(n).cloned().collect();
    debug!("Top rows: {:?}", top.iter().map(|r| (&r.row.name, r.row.base_experience)).collect::<Vec<_>>());
    top
}

/// Categorize, then derive counts, statistics and the top `n` from the categorized table
pub fn run_pipeline(table: Vec<Row>, n: usize) -> PipelineOutput {
    info!("Transforming {} rows", table.len());
    let categorized = categorize(table);
    let type_counts = count_by_type(&categorized);
    let type_stats = type_statistics(&categorized);
    let top = top_n(&categorized, n);
    info!("Transformation complete");

    PipelineOutput { categorized, type_counts, type_stats, top }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;
