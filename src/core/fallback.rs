//! Field-by-field merge of CMS values over static fallback records.
//!
//! A CMS value wins only when it is *present*: an empty string or an empty
//! list counts as absent, never as an explicit "nothing". Lists are chosen
//! whole, never merged item by item.

use crate::domain::model::{Business, BusinessPatch, ServicePage, ServicePagePatch};

pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for &str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

/// The CMS value if present, else the fallback.
pub fn prefer<T: Presence>(cms: Option<T>, fallback: T) -> T {
    match cms {
        Some(value) if value.is_present() => value,
        _ => fallback,
    }
}

/// Like [`prefer`] for fields the fallback may also lack. An absent result
/// is normalised to `None` so views can omit the field.
pub fn prefer_opt<T: Presence>(cms: Option<T>, fallback: Option<T>) -> Option<T> {
    match cms {
        Some(value) if value.is_present() => Some(value),
        _ => fallback.filter(Presence::is_present),
    }
}

/// Applies a patch of CMS values over a fully populated fallback record.
pub trait Overlay: Sized {
    type Patch;

    fn overlay(self, patch: Self::Patch) -> Self;
}

/// Implements [`Overlay`] from a declared field list.
///
/// `required` fields use [`prefer`]; `optional` fields (where the target is
/// an `Option`) use [`prefer_opt`]. Target paths may be nested
/// (`address.street <= street`).
#[macro_export]
macro_rules! overlay_fields {
    (
        impl Overlay for $target:ty where Patch = $patch:ty {
            required { $( $($field:ident).+ <= $source:ident ),* $(,)? }
            optional { $( $($ofield:ident).+ <= $osource:ident ),* $(,)? }
        }
    ) => {
        impl $crate::core::fallback::Overlay for $target {
            type Patch = $patch;

            fn overlay(mut self, patch: $patch) -> Self {
                $(
                    self.$($field).+ =
                        $crate::core::fallback::prefer(patch.$source, self.$($field).+);
                )*
                $(
                    self.$($ofield).+ =
                        $crate::core::fallback::prefer_opt(patch.$osource, self.$($ofield).+);
                )*
                self
            }
        }
    };
}

overlay_fields! {
    impl Overlay for ServicePage where Patch = ServicePagePatch {
        required {
            name <= name,
            slug <= slug,
            hero_headline <= hero_headline,
            hero_subheadline <= hero_subheadline,
            cta_label <= cta_label,
            cta_url <= cta_url,
            description <= description,
            details <= details,
            process_steps <= process_steps,
            faqs <= faqs,
            secondary_keywords <= secondary_keywords,
            schema_name <= schema_name,
            schema_description <= schema_description,
            schema_area_served <= schema_area_served,
        }
        optional {
            hero_body <= hero_body,
            primary_keyword <= primary_keyword,
        }
    }
}

overlay_fields! {
    impl Overlay for Business where Patch = BusinessPatch {
        required {
            business_name <= business_name,
            phone <= phone,
            email <= email,
            address.street <= street,
            address.city <= city,
            address.state <= state,
            address.zip <= zip,
            service_area_label <= service_area_label,
        }
        optional {
            business_hours <= business_hours,
            social.facebook <= facebook,
            social.instagram <= instagram,
            social.google <= google,
            social.yelp <= yelp,
            social.linkedin <= linkedin,
        }
    }
}
