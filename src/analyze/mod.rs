pub mod buffer;
pub mod declaration;
pub mod exports;
pub mod imports;
pub mod outline;
pub mod path;
pub mod prologue;

pub use buffer::{LineEnding, SourceBuffer};
pub use declaration::{
    declarations, declared_names, declares, ensure_exported, find_declaration, first_declaration,
    has_declaration_conflict, has_move_conflict, referenced_identifiers, references, strip_export,
};
pub use exports::{add_reexport, exports_locally, remove_from_export_lists, reexport_statement};
pub use imports::{
    find_existing_import, import_statement, imported_names, merge_imports,
    remove_import_from_source, remove_named_import, NamedImport,
};
pub use outline::{find_by_name, find_enclosing, HeuristicOutline, LineRange, OutlineNode, OutlineProvider};
pub use path::relative_import_path;
pub use prologue::insert_after_directives_and_comments;
