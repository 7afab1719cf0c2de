//! Per-file rewrite rules applied while mirroring the export tree.

mod computed;
mod fields;
mod idmap;
mod rename;

pub use computed::{ComputedFieldScrubber, FieldInfo, FieldsSource};
pub use fields::{
    model_unwanted_fields, process_sequence_fields, remove_fields, remove_ref_fields,
};
pub use idmap::{apply_id_map, build_id_map};
pub use rename::IdentifierRules;
