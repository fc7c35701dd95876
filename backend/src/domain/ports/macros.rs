//! Helper macro for declaring repository error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! field parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StoreError {
            Unreachable => "store unreachable",
            Rejected { reason: String } => "rejected: {reason}",
            Retried { reason: String, attempts: u8 } => "{reason} after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::unreachable().to_string(), "store unreachable");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = StoreError::rejected("duplicate title");
        assert_eq!(err, StoreError::Rejected {
            reason: "duplicate title".to_owned()
        });
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = StoreError::retried("timeout", 3_u8);
        assert_eq!(err.to_string(), "timeout after 3 attempts");
    }
}
