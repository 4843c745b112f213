//! Small declarative helpers shared by the HTTP apps.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web as __actix_web;

/// Generate a `routes` function that registers handlers and nested route
/// modules on an actix `ServiceConfig`.
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     module reports,
/// }
/// ```
///
/// `route` entries are handlers annotated with the actix routing macros,
/// `module` entries are child modules exposing their own `routes` function.
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    (@register $cfg:ident, route $handler:ident) => {
        $cfg.service($handler);
    };
    (@register $cfg:ident, module $module:ident) => {
        $module::routes($cfg);
    };
    ($($kind:ident $item:ident),* $(,)?) => {
        pub fn routes(cfg: &mut $crate::__actix_web::web::ServiceConfig) {
            $($crate::routes!(@register cfg, $kind $item);)*
        }
    };
}
