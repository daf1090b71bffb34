use std::ffi::c_void;

use ash::vk::{
    DebugUtilsMessageSeverityFlagsEXT as Severity, DebugUtilsMessageTypeFlagsEXT as MessageType,
};

pub(super) struct DebugObjs {
    pub utils: ash::ext::debug_utils::Instance,
    pub messenger: ash::vk::DebugUtilsMessengerEXT,
}

/// Maps a validation message severity onto a `log` level. The most severe bit
/// wins when several are set.
pub fn severity_level(severity: Severity) -> log::Level {
    if severity.contains(Severity::ERROR) {
        log::Level::Error
    } else if severity.contains(Severity::WARNING) {
        log::Level::Warn
    } else if severity.contains(Severity::INFO) {
        log::Level::Info
    } else {
        log::Level::Trace
    }
}

unsafe extern "system" fn debug_callback(
    message_severity: Severity,
    message_types: MessageType,
    p_callback_data: *const ash::vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _p_user_data: *mut c_void,
) -> ash::vk::Bool32 {
    if p_callback_data.is_null() {
        return ash::vk::FALSE;
    }

    // Safety: the loader hands us a valid callback data struct for the duration of the call.
    let message = unsafe { (*p_callback_data).message_as_c_str() }
        .map(|msg| msg.to_string_lossy())
        .unwrap_or_default();

    log::log!(
        target: "vulkan",
        severity_level(message_severity),
        "{message_types:?}: {message}"
    );

    ash::vk::FALSE
}

pub fn messenger_create_info() -> ash::vk::DebugUtilsMessengerCreateInfoEXT<'static> {
    ash::vk::DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(
            Severity::VERBOSE | Severity::ERROR | Severity::WARNING | Severity::INFO,
        )
        .message_type(MessageType::GENERAL | MessageType::PERFORMANCE | MessageType::VALIDATION)
        .pfn_user_callback(Some(debug_callback))
}
