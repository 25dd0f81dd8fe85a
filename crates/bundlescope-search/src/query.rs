use bundlescope_types::SearchHit;

use crate::filter::CompiledFilter;
use crate::store::RecordStore;

/// Cap on returned hits; keeps rendering responsive on huge bundles
pub const DEFAULT_HIT_LIMIT: usize = 2000;

/// Run a line search over the store.
///
/// Records are scanned in store order and lines are numbered from 1. With no
/// pattern, a scoped search lists every line of the scoped record (browse
/// mode); an unscoped one returns nothing. At most `limit` hits come back.
pub fn search(store: &RecordStore, filter: &CompiledFilter, limit: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    if !filter.has_pattern() && !filter.is_scoped() {
        return hits;
    }

    'records: for record in store.all() {
        if !filter.in_scope(&record.id) {
            continue;
        }

        for (index, line) in record.content.lines().enumerate() {
            if hits.len() >= limit {
                break 'records;
            }
            if !filter.matches(line) {
                continue;
            }

            hits.push(SearchHit {
                record_id: record.id.clone(),
                record_name: record.name.clone(),
                line_number: index + 1,
                line: line.to_string(),
                spans: filter.find_spans(line),
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlescope_types::LogRecord;

    fn store_with(records: Vec<(&str, &str, &str)>) -> RecordStore {
        let store = RecordStore::new();
        store.extend(
            records
                .into_iter()
                .map(|(id, name, content)| {
                    LogRecord::new(
                        id.to_string(),
                        name.to_string(),
                        content.to_string(),
                        content.len(),
                        "bundle.tar.gz".to_string(),
                    )
                })
                .collect(),
        );
        store
    }

    #[test]
    fn test_search_across_all_records() {
        let store = store_with(vec![
            ("1", "a.log", "ok\nerror: disk full\nok\n"),
            ("2", "b.log", "error: timeout\n"),
        ]);
        let filter = CompiledFilter::new("error").unwrap();

        let hits = search(&store, &filter, DEFAULT_HIT_LIMIT);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record_name, "a.log");
        assert_eq!(hits[0].line_number, 2);
        assert_eq!(hits[1].record_name, "b.log");
        assert_eq!(hits[1].line_number, 1);
    }

    #[test]
    fn test_search_scoped_to_one_record() {
        let store = store_with(vec![
            ("1", "a.log", "error one\n"),
            ("2", "b.log", "error two\n"),
        ]);
        let filter = CompiledFilter::new("error")
            .unwrap()
            .scoped_to(Some("2".to_string()));

        let hits = search(&store, &filter, DEFAULT_HIT_LIMIT);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record_id, "2");
    }

    #[test]
    fn test_empty_pattern_with_scope_lists_all_lines() {
        let store = store_with(vec![("1", "a.log", "one\ntwo\nthree\n")]);
        let filter = CompiledFilter::new("")
            .unwrap()
            .scoped_to(Some("1".to_string()));

        let hits = search(&store, &filter, DEFAULT_HIT_LIMIT);
        assert_eq!(hits.len(), 3);
        assert!(hits[0].spans.is_empty());
    }

    #[test]
    fn test_empty_pattern_without_scope_returns_nothing() {
        let store = store_with(vec![("1", "a.log", "one\ntwo\n")]);
        let filter = CompiledFilter::new("").unwrap();

        assert!(search(&store, &filter, DEFAULT_HIT_LIMIT).is_empty());
    }

    #[test]
    fn test_hit_limit_is_enforced() {
        let content = "match\n".repeat(50);
        let store = store_with(vec![("1", "a.log", &content)]);
        let filter = CompiledFilter::new("match").unwrap();

        let hits = search(&store, &filter, 10);
        assert_eq!(hits.len(), 10);
    }

    #[test]
    fn test_spans_point_at_matches() {
        let store = store_with(vec![("1", "a.log", "xx error yy\n")]);
        let filter = CompiledFilter::new("error").unwrap();

        let hits = search(&store, &filter, DEFAULT_HIT_LIMIT);
        assert_eq!(hits[0].spans, vec![(3, 8)]);
    }
}
