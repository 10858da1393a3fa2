use std::collections::BTreeSet;

use catalog_model::{Dataset, Defaults, LinkedValues, Mapping, RawRow};
use catalog_schema::Schema;
use catalog_transform::{TransformInput, apply_defaults, map_row, output_columns, transform};
use proptest::prelude::*;

const TARGETS: &[&str] = &["gtin", "han", "artikelname", "preis", "farbe"];

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    let row = prop::collection::btree_map("[A-E]", "[a-z0-9 ]{0,6}", 0..5)
        .prop_map(|cells| cells.into_iter().collect::<RawRow>());
    prop::collection::vec(row, 0..8).prop_map(|rows| Dataset::new(Vec::new(), rows))
}

fn mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::vec(("[A-F]", prop::sample::select(TARGETS)), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn regular_rows_carry_exactly_the_mapped_fields(
        data in dataset_strategy(),
        mapping in mapping_strategy(),
    ) {
        let schema = Schema::builtin();
        let rows = transform(&schema, &TransformInput {
            dataset: &data,
            mapping: &mapping,
            defaults: &Defaults::new(),
            linked_values: &LinkedValues::new(),
            parents: &[],
        });

        prop_assert_eq!(rows.len(), data.len());
        let expected: BTreeSet<&str> = mapping.iter().map(|(_, target)| target).collect();
        for row in &rows {
            let keys: BTreeSet<&str> = row.keys().collect();
            prop_assert_eq!(&keys, &expected);
            prop_assert!(!row.is_parent);
        }
        let columns = output_columns(&rows);
        prop_assert!(!columns.iter().any(|c| c == "isParent" || c == "children"));
    }

    #[test]
    fn defaults_are_idempotent(
        data in dataset_strategy(),
        mapping in mapping_strategy(),
        value in "[a-z]{1,4}",
    ) {
        let defaults: Defaults = TARGETS.iter().map(|t| (t.to_string(), value.clone())).collect();
        for raw in &data.rows {
            let once = map_row(raw, &mapping, &defaults);
            let mut twice = once.clone();
            apply_defaults(&mut twice, &defaults);
            prop_assert_eq!(once, twice);
        }
    }
}
