//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed for
//! each entity kind.

/// Declare an entity kind over a props type
///
/// Generates a struct holding the id and the props, its
/// [`Entity`](crate::core::entity::Entity) implementation, and the validating
/// constructors `new` / `from_value` plus `update_props`, which domain
/// mutators build on.
///
/// # Example
///
/// ```rust,ignore
/// use seedwork::prelude::*;
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// pub struct ProductProps {
///     pub name: String,
///     pub price: f64,
/// }
///
/// impl EntityProps for ProductProps {}
///
/// impl_entity!(Product, "product", ProductProps);
///
/// impl Product {
///     pub fn rename(&mut self, name: String) -> Result<(), ValidationError> {
///         self.update_props(|props| props.name = name)
///     }
/// }
///
/// let product = Product::new(ProductProps { name: "Pen".into(), price: 1.5 }, None)?;
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $type_name:expr, $props:ty) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub struct $type {
            /// Unique identifier for this entity
            id: $crate::core::entity::EntityId,

            /// Kind-specific fields, flattened next to the id when serialized
            #[serde(flatten)]
            props: $props,
        }

        impl $crate::core::entity::Entity for $type {
            type Props = $props;

            fn entity_type() -> &'static str {
                $type_name
            }

            fn id(&self) -> &$crate::core::entity::EntityId {
                &self.id
            }

            fn props(&self) -> &$props {
                &self.props
            }
        }

        impl $type {
            /// Create a validated entity, generating an id when none is given
            pub fn new(
                props: $props,
                id: Option<&str>,
            ) -> Result<Self, $crate::core::error::ValidationError> {
                let id = $crate::core::entity::prepare(&props, id)?;
                Ok(Self { id, props })
            }

            /// Create a validated entity from raw JSON input
            pub fn from_value(
                raw: ::serde_json::Value,
                id: Option<&str>,
            ) -> Result<Self, $crate::core::error::ValidationError> {
                let props = $crate::core::entity::props_from_value::<$props>(raw)?;
                Self::new(props, id)
            }

            /// Apply `mutate` to the props, keeping the previous state if the
            /// result breaks a rule
            pub fn update_props<F>(
                &mut self,
                mutate: F,
            ) -> Result<(), $crate::core::error::ValidationError>
            where
                F: FnOnce(&mut $props),
            {
                let mut next = self.props.clone();
                mutate(&mut next);
                $crate::core::entity::validate_props(&next)?;
                self.props = next;
                Ok(())
            }
        }
    };
}
