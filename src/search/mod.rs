use indexmap::IndexMap;

use crate::catalog::{Catalog, StaffRecord};

/// Records sharing one subject, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGroup<'a> {
    pub subject: &'a str,
    pub records: Vec<&'a StaffRecord>,
}

impl<'a> SubjectGroup<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Trim then lowercase. No width or kana folding is applied.
pub fn normalize_search(input: &str) -> String {
    input.trim().to_lowercase()
}

/// `normalized` must already have gone through [`normalize_search`].
pub fn matches_record(normalized: &str, record: &StaffRecord) -> bool {
    if normalized.is_empty() {
        return true;
    }
    if record.name.to_lowercase().contains(normalized) {
        return true;
    }
    record
        .phonetic_name
        .as_deref()
        .map(|phonetic| phonetic.to_lowercase().contains(normalized))
        .unwrap_or(false)
}

pub fn filter_records<'a>(catalog: &'a Catalog, raw_query: &str) -> Vec<&'a StaffRecord> {
    let normalized = normalize_search(raw_query);
    catalog
        .iter()
        .filter(|record| matches_record(&normalized, record))
        .collect()
}

/// Partition by subject, keeping input order inside each group and sorting
/// the groups by subject.
pub fn group_by_subject<'a, I>(records: I) -> Vec<SubjectGroup<'a>>
where
    I: IntoIterator<Item = &'a StaffRecord>,
{
    let mut groups: IndexMap<&'a str, Vec<&'a StaffRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.subject.as_str())
            .or_default()
            .push(record);
    }
    groups.sort_keys();
    groups
        .into_iter()
        .map(|(subject, records)| SubjectGroup { subject, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::record;
    use anyhow::Result;
    use std::collections::HashSet;

    fn sample_catalog() -> Result<Catalog> {
        Ok(Catalog::from_records(vec![
            record(1, "Ada Lovelace", Some("ada"), "Math"),
            record(2, "Grace Hopper", None, "Computing"),
            record(3, "Alan Turing", Some("alan"), "Math"),
            record(4, "青木 春香", Some("あおき はるか"), "国語"),
            record(5, "Barbara Liskov", Some("BARB"), "Computing"),
            record(6, "Ｍａｒｙ", None, "Art"),
        ])?)
    }

    fn ids(records: &[&StaffRecord]) -> Vec<u32> {
        records.iter().map(|record| record.id).collect()
    }

    #[test]
    fn normalizer_trims_and_lowercases_only() {
        assert_eq!(normalize_search("  AdA \t"), "ada");
        assert_eq!(normalize_search("\u{3000}あおき\u{3000}"), "あおき");
        assert_eq!(normalize_search("   "), "");
        assert_eq!(normalize_search("Ｍａｒｙ"), "ｍａｒｙ");
    }

    #[test]
    fn matches_name_or_phonetic_name() -> Result<()> {
        let catalog = sample_catalog()?;
        assert_eq!(ids(&filter_records(&catalog, "LOVE")), vec![1]);
        assert_eq!(ids(&filter_records(&catalog, "barb")), vec![5]);
        assert_eq!(ids(&filter_records(&catalog, "はるか")), vec![4]);
        assert_eq!(ids(&filter_records(&catalog, "青木")), vec![4]);
        assert_eq!(ids(&filter_records(&catalog, "al")), vec![3]);
        Ok(())
    }

    #[test]
    fn missing_phonetic_name_never_matches_on_its_own() -> Result<()> {
        let catalog = sample_catalog()?;
        assert!(filter_records(&catalog, "hopper").len() == 1);
        assert!(filter_records(&catalog, "zzz").is_empty());
        Ok(())
    }

    #[test]
    fn width_variants_are_not_folded() -> Result<()> {
        let catalog = sample_catalog()?;
        assert!(filter_records(&catalog, "mary").is_empty());
        assert_eq!(ids(&filter_records(&catalog, "ｍａｒｙ")), vec![6]);
        assert!(filter_records(&catalog, "アオキ").is_empty());
        Ok(())
    }

    #[test]
    fn blank_query_keeps_every_record_in_order() -> Result<()> {
        let catalog = sample_catalog()?;
        let all: Vec<u32> = catalog.iter().map(|record| record.id).collect();
        assert_eq!(ids(&filter_records(&catalog, "")), all);
        assert_eq!(ids(&filter_records(&catalog, "  \t ")), all);
        Ok(())
    }

    #[test]
    fn filtering_is_repeatable() -> Result<()> {
        let catalog = sample_catalog()?;
        for query in ["", "a", "AL", "はる", "nothing"] {
            assert_eq!(filter_records(&catalog, query), filter_records(&catalog, query));
        }
        Ok(())
    }

    #[test]
    fn groups_sorted_by_subject_with_catalog_order_inside() -> Result<()> {
        let catalog = sample_catalog()?;
        let groups = group_by_subject(catalog.iter());
        let subjects: Vec<&str> = groups.iter().map(|group| group.subject).collect();
        assert_eq!(subjects, vec!["Art", "Computing", "Math", "国語"]);
        assert_eq!(ids(&groups[1].records), vec![2, 5]);
        assert_eq!(ids(&groups[2].records), vec![1, 3]);
        assert!(groups.iter().all(|group| !group.is_empty()));
        Ok(())
    }

    #[test]
    fn groups_partition_the_filtered_records() -> Result<()> {
        let catalog = sample_catalog()?;
        for query in ["", "a", "r", "ada", "はるか"] {
            let filtered = filter_records(&catalog, query);
            let groups = group_by_subject(filtered.iter().copied());

            let grouped: Vec<u32> = groups
                .iter()
                .flat_map(|group| group.records.iter().map(|record| record.id))
                .collect();
            let grouped_set: HashSet<u32> = grouped.iter().copied().collect();
            let filtered_set: HashSet<u32> = filtered.iter().map(|record| record.id).collect();
            assert_eq!(grouped.len(), filtered.len());
            assert_eq!(grouped_set, filtered_set);

            for group in &groups {
                let expected: Vec<u32> = filtered
                    .iter()
                    .filter(|record| record.subject == group.subject)
                    .map(|record| record.id)
                    .collect();
                assert_eq!(ids(&group.records), expected);
            }
            for pair in groups.windows(2) {
                assert!(pair[0].subject < pair[1].subject);
            }
        }
        Ok(())
    }

    #[test]
    fn no_matches_means_no_groups() -> Result<()> {
        let catalog = sample_catalog()?;
        let groups = group_by_subject(filter_records(&catalog, "xyzzy"));
        assert!(groups.is_empty());
        Ok(())
    }
}
