//! Composition engine for builder-made pages.
//!
//! Four layers, leaves first:
//! - field schemas (in `storefront-model`) describe each component's props
//! - the [`Registry`] maps a type name to its definition: fields, defaults,
//!   optional per-placement field sets, optional data resolver, render
//! - documents (in `storefront-model`) hold the typed node tree per page
//! - the [`Pipeline`] walks a document: effective fields per parent,
//!   concurrent data resolution, then a pre-order render with per-node
//!   failure isolation
//!
//! [`EditSession`] is the editor-side counterpart: validated tree mutations,
//! generation-guarded resolution, publish.
//!
//! # Example
//!
//! ```ignore
//! let mut builder = Registry::builder();
//! builder.category("typography", "Typography");
//! builder.register(Heading)?.register(Text)?;
//! let registry = Arc::new(builder.build());
//!
//! let pipeline = Pipeline::new(registry);
//! let rendered = pipeline.run(&document, RenderOptions::default()).await;
//! ```

mod definition;
mod error;
mod fields;
mod frame;
mod markup;
mod pipeline;
mod registry;
mod resolution;
mod session;
pub mod tree;

pub use definition::{
    from_props, to_props, AnyComponent, ComponentDefinition, FieldContext, RenderContext,
    SlotRenderer,
};
pub use error::{ComposeError, ComposeResult, RenderError, ResolveError};
pub use frame::{spacing_options, LayoutFrame, LAYOUT_FIELD, SPACING};
pub use markup::{escape, Element, Markup};
pub use pipeline::{NodeStatus, Pipeline, RenderOptions, Rendered, RenderedNode, Resolutions};
pub use registry::{Category, Registry, RegistryBuilder, RootSchema};
pub use resolution::{
    Completion, DataResolver, PendingResolution, ResolutionOutcome, ResolutionTicket,
    ResolutionTracker, Resolved,
};
pub use session::EditSession;
pub use tree::SlotRef;
