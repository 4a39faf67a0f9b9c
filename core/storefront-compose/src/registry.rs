//! The component registry.
//!
//! Built once at startup through [`RegistryBuilder`], then shared read-only
//! by the editor API and the render pipeline. Registration is where prop
//! conformance is checked: defaults must satisfy the declared schema and
//! every context-specific field set must stay within it.

use crate::definition::{AnyComponent, ComponentDefinition, FieldContext, Typed};
use crate::error::{ComposeError, ComposeResult};
use crate::frame::Framed;
use indexmap::IndexMap;
use serde::Serialize;
use storefront_model::{
    validate_props, ComponentInstance, FieldMap, LayoutContext, Props,
};
use storefront_types::NodeId;
use tracing::{debug, info};

/// A palette group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub components: Vec<String>,
}

/// Schema and defaults of the document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootSchema {
    pub fields: FieldMap,
    pub defaults: Props,
}

/// Read-only mapping from component type name to definition.
pub struct Registry {
    components: IndexMap<String, Box<dyn AnyComponent>>,
    categories: IndexMap<String, Category>,
    root: RootSchema,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, component_type: &str) -> Option<&dyn AnyComponent> {
        self.components.get(component_type).map(|c| c.as_ref())
    }

    /// Like [`get`](Self::get) but an unknown type is an error.
    pub fn require(&self, component_type: &str) -> ComposeResult<&dyn AnyComponent> {
        self.get(component_type)
            .ok_or_else(|| ComposeError::UnknownComponent(component_type.to_string()))
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.components.contains_key(component_type)
    }

    /// Registered type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn components(&self) -> impl Iterator<Item = &dyn AnyComponent> {
        self.components.values().map(|c| c.as_ref())
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn root(&self) -> &RootSchema {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Layout context for children of a `parent` slot. Top level and
    /// unknown parents are standalone.
    pub fn child_context(&self, parent: Option<&str>) -> LayoutContext {
        parent
            .and_then(|p| self.get(p))
            .map(|c| c.child_layout())
            .unwrap_or_default()
    }

    /// A new instance of `component_type` with default props and a fresh id.
    pub fn instantiate(&self, component_type: &str) -> ComposeResult<ComponentInstance> {
        let component = self.require(component_type)?;
        Ok(ComponentInstance::new(
            component.name(),
            NodeId::generate(component.name()),
            component.defaults().clone(),
        ))
    }

    /// Names of the slot fields declared by `component_type`.
    pub fn slot_fields(&self, component_type: &str) -> Vec<String> {
        self.get(component_type)
            .map(|c| c.fields().slots().map(|(name, _)| name.to_string()).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("categories", &self.categories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    components: IndexMap<String, Box<dyn AnyComponent>>,
    categories: IndexMap<String, Category>,
    root: RootSchema,
}

impl RegistryBuilder {
    /// Declares a palette category. Components join it in registration order.
    pub fn category(&mut self, key: &str, title: &str) -> &mut Self {
        self.categories.insert(
            key.to_string(),
            Category {
                key: key.to_string(),
                title: title.to_string(),
                components: Vec::new(),
            },
        );
        self
    }

    /// Sets the root field schema and default root props.
    pub fn root(&mut self, fields: FieldMap, defaults: Props) -> ComposeResult<&mut Self> {
        let violations = validate_props(&fields, &defaults);
        if !violations.is_empty() {
            return Err(ComposeError::InvalidDefaults {
                component: "root".to_string(),
                violations,
            });
        }
        self.root = RootSchema { fields, defaults };
        Ok(self)
    }

    /// Registers a component, wrapping it in a layout frame when it asks for one.
    pub fn register<D: ComponentDefinition>(&mut self, def: D) -> ComposeResult<&mut Self> {
        let layout = def.layout();
        let typed: Box<dyn AnyComponent> = Box::new(Typed::new(def)?);
        let component: Box<dyn AnyComponent> = match layout {
            Some(own) => Box::new(Framed::wrap(typed, &own)),
            None => typed,
        };
        self.insert(component)
    }

    fn insert(&mut self, component: Box<dyn AnyComponent>) -> ComposeResult<&mut Self> {
        let name = component.name().to_string();
        if self.components.contains_key(&name) {
            return Err(ComposeError::DuplicateComponent(name));
        }
        check_conformance(component.as_ref())?;

        if let Some(key) = component.category() {
            let category = self.categories.get_mut(key).ok_or_else(|| {
                ComposeError::UnknownCategory {
                    component: name.clone(),
                    category: key.to_string(),
                }
            })?;
            category.components.push(name.clone());
        }

        debug!(component = %name, inline = component.is_inline(), "Registered component");
        self.components.insert(name, component);
        Ok(self)
    }

    pub fn build(self) -> Registry {
        info!(
            components = self.components.len(),
            categories = self.categories.len(),
            "Component registry built"
        );
        Registry {
            components: self.components,
            categories: self.categories,
            root: self.root,
        }
    }
}

/// Defaults conform to the declared fields, and no placement exposes a
/// field outside them.
fn check_conformance(component: &dyn AnyComponent) -> ComposeResult<()> {
    let violations = validate_props(component.fields(), component.defaults());
    if !violations.is_empty() {
        return Err(ComposeError::InvalidDefaults {
            component: component.name().to_string(),
            violations,
        });
    }
    for layout in LayoutContext::ALL {
        let ctx = FieldContext {
            parent: None,
            layout,
        };
        let resolved = component.resolve_fields(component.defaults(), &ctx);
        if let Some((field, _)) = resolved
            .iter()
            .find(|(name, spec)| !component.fields().get(name).is_some_and(|d| d.admits(spec)))
        {
            return Err(ComposeError::UndeclaredField {
                component: component.name().to_string(),
                field: field.to_string(),
                context: layout,
            });
        }
    }
    Ok(())
}
