/// Emit a tracing event only when the scope's configured level admits it.
///
/// `scoped_log!(debug, "teleport", "committed to {:?}", position)`
#[macro_export]
macro_rules! scoped_log {
    (@emit $level:ident, $mac:ident, $scope:expr, $($arg:tt)*) => {{
        let log_config = $crate::logging::get_log_config();
        if log_config.should_log($scope, $crate::logging::Level::$level) {
            $crate::logging::$mac!(scope = $scope, $($arg)*);
        }
    }};
    (trace, $scope:expr, $($arg:tt)*) => { $crate::scoped_log!(@emit TRACE, trace, $scope, $($arg)*) };
    (debug, $scope:expr, $($arg:tt)*) => { $crate::scoped_log!(@emit DEBUG, debug, $scope, $($arg)*) };
    (info, $scope:expr, $($arg:tt)*) => { $crate::scoped_log!(@emit INFO, info, $scope, $($arg)*) };
    (warn, $scope:expr, $($arg:tt)*) => { $crate::scoped_log!(@emit WARN, warn, $scope, $($arg)*) };
    (error, $scope:expr, $($arg:tt)*) => { $crate::scoped_log!(@emit ERROR, error, $scope, $($arg)*) };
}

#[macro_export]
macro_rules! locomotion_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "locomotion", $($arg)*)
    };
}

#[macro_export]
macro_rules! teleport_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "teleport", $($arg)*)
    };
}

#[macro_export]
macro_rules! targeting_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "targeting", $($arg)*)
    };
}

#[macro_export]
macro_rules! physics_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "physics", $($arg)*)
    };
}

#[macro_export]
macro_rules! interest_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "interest", $($arg)*)
    };
}
