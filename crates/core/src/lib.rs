mod config;
mod error;
mod model;
mod ordering;
mod recorder;
mod resolver;
mod sanitize;
mod sequence;
mod template;

pub const DEFAULT_FILENAME_TEMPLATE: &str = "{album_seq}_{orig_name}";

pub use config::{
    app_paths, load_config, load_config_from, parse_sequence_start, save_config,
    sequence_start_from_env, AppConfig, AppPaths, SEQUENCE_START_ENV,
};
pub use error::{NotAMember, Result, SortOrderError};
pub use model::{AlbumInfo, AlbumRecord, ExportResults, PhotoInfo, PhotoRecord, RenderContext};
pub use ordering::index_of;
pub use recorder::{
    record_album_sort_order, sort_order_path, NoopVerbose, RecordOutcome, SortOrderEntry,
    StopReason, TracingVerbose, VerboseLog, SORT_ORDER_SUFFIX,
};
pub use resolver::{album_folder_path, album_for_dest_path, album_for_title};
pub use sanitize::sanitize_dirname;
pub use sequence::{render_album_sequence, render_album_sequence_from_env};
pub use template::{
    parse_template, render_filename, validate_template, TemplateError, TemplatePart, Token,
};
