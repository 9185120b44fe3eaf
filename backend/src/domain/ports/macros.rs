//! Helper macro for port error enums.
//!
//! `define_port_error!` derives `thiserror::Error` and adds one snake_case
//! constructor per variant. Field parameters accept `impl Into<T>` so callers
//! can pass `&str` where the variant stores a `String`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };
    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),+ } )?,
            )+
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field: $ty),+ } )?);
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "offline",
            Refused { host: String } => "refused by {host}",
            Limited { host: String, max: u16 } => "{host} allows {max}",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = SamplePortError::refused("storage.local");
        assert_eq!(err.to_string(), "refused by storage.local");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::limited("storage.local", 3_u16);
        assert_eq!(
            err,
            SamplePortError::Limited {
                host: "storage.local".to_owned(),
                max: 3
            }
        );
        assert_eq!(err.to_string(), "storage.local allows 3");
    }
}
