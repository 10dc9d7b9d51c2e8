//! Macros for reducing boilerplate when defining records
//!
//! Every persisted entity shares the same base columns (`id`, `created_at`,
//! `updated_at`, `deleted_at`) and the same [`Record`](crate::core::Record)
//! plumbing. `impl_record!` generates the struct, the trait impl and a
//! constructor from the entity-specific columns alone.

/// Create a record type with automatic [`Record`](crate::core::Record)
/// implementation
///
/// # Example
///
/// ```rust,ignore
/// impl_record!(
///     Category,
///     "category",
///     "categories",
///     filterable: ["title"],
///     sortable: ["title", "created_at"],
///     {
///         title: String,
///     }
/// );
///
/// let category = Category::new("Music".to_string());
/// assert_eq!(category.id, 0); // assigned by the store
/// ```
macro_rules! impl_record {
    (
        $(#[$meta:meta])*
        $type:ident,
        $resource:expr,
        $table:expr,
        filterable: [ $( $filterable:expr ),* $(,)? ],
        sortable: [ $( $sortable:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[cfg_attr(feature = "mysql", derive(::sqlx::FromRow))]
        pub struct $type {
            /// Auto-increment identifier, 0 until stored
            pub id: u64,

            $( $(#[$field_meta])* pub $field : $field_type, )*

            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// Set when soft-deleted
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,
        }

        impl $crate::core::entity::Record for $type {
            const FILTERABLE_FIELDS: &'static [&'static str] = &[ $( $filterable ),* ];

            const SORTABLE_FIELDS: &'static [&'static str] = &[ $( $sortable ),* ];

            fn resource_name() -> &'static str {
                $resource
            }

            fn table_name() -> &'static str {
                $table
            }

            fn columns() -> &'static [&'static str] {
                &[ $( stringify!($field), )* "created_at", "updated_at", "deleted_at" ]
            }

            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::IntoFieldValue;

                $(
                    if field == stringify!($field) {
                        return Some(self.$field.clone().into_field_value());
                    }
                )*

                match field {
                    "id" => Some(self.id.into_field_value()),
                    "created_at" => Some(self.created_at.into_field_value()),
                    "updated_at" => Some(self.updated_at.into_field_value()),
                    "deleted_at" => Some(self.deleted_at.into_field_value()),
                    _ => None,
                }
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }

            fn soft_delete(&mut self) {
                let now = ::chrono::Utc::now();
                self.deleted_at = Some(now);
                self.updated_at = now;
            }
        }

        impl $type {
            /// Create an unsaved record with fresh timestamps
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_type ),*) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: 0,
                    $( $field, )*
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                }
            }
        }
    };
}

pub(crate) use impl_record;
