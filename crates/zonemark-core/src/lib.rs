//! Zonemark Core Library
//!
//! Headless editing core for labelled extraction regions on rendered
//! documents: coordinate mapping, region bookkeeping, pointer interaction
//! and persistence. Drawing is delegated to a host [`Surface`].

pub mod events;
pub mod import;
pub mod input;
pub mod interaction;
pub mod region;
pub mod settings;
pub mod storage;
pub mod store;
pub mod surface;
pub mod transform;
pub mod validator;

pub use events::RegionEvent;
pub use import::{ImportError, ImportList, ImportReport, validate_document_path};
pub use input::{InputState, MouseButton, PointerEvent};
pub use interaction::{
    Corner, InteractionController, InteractionState, Mode, Outcome, PendingRegion, SelectionTool,
    Word, WordList,
};
pub use region::{MAX_LABEL_LEN, Region, RegionError, RegionResult, validate_label};
pub use settings::EditorSettings;
pub use storage::{LoadReport, RegionConfig, RegionEntry, Storage, StorageError};
pub use store::RegionStore;
pub use surface::{CursorShape, NullSurface, RecordingSurface, RegionStyle, ShapeHandle, Surface};
pub use transform::{CoordinateTransformer, TransformState, normalize_rect};
pub use validator::{Domain, DuplicateValidator};
