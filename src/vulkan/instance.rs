use std::ffi::{c_char, CStr, CString, NulError};

use thiserror::Error;
use winit::raw_window_handle::RawDisplayHandle;

use super::debug::{self, DebugObjs};
use super::support;
use crate::config::InstanceConfig;

pub struct Instance {
    instance: ash::Instance,
    debug_objs: Option<DebugObjs>,
    // Keeps the loader library alive until the instance is destroyed.
    _entry: ash::Entry,
}

#[derive(Debug, Error)]
pub enum InstanceCreateError {
    #[error("failed to load the vulkan library")]
    Loading(#[from] ash::LoadingError),
    #[error("vulkan error")]
    VkError(#[from] ash::vk::Result),
    #[error("name contains an interior nul byte")]
    InvalidName(#[from] NulError),
    #[error("validation layers requested, but not available: {}", .0.join(", "))]
    UnsupportedValidationLayers(Vec<String>),
    #[error("unsupported instance extensions: {}", .0.join(", "))]
    UnsupportedExtensions(Vec<String>),
}

impl Instance {
    pub fn new(
        config: &InstanceConfig,
        display_handle: RawDisplayHandle,
    ) -> Result<Self, InstanceCreateError> {
        // Safety: the entry is stored alongside the instance and outlives it.
        let entry = unsafe { ash::Entry::load()? };

        let application_name = CString::new(config.application_name.as_str())?;
        let engine_name = CString::new(config.engine_name.as_str())?;

        let app_info = ash::vk::ApplicationInfo::default()
            .application_name(&application_name)
            .application_version(config.application_version)
            .engine_name(&engine_name)
            .engine_version(config.engine_version)
            .api_version(config.api_version);

        log::debug!("Getting required Vulkan extensions from the window system...");
        let window_extensions = ash_window::enumerate_required_extensions(display_handle)?
            .iter()
            // Safety: ash-window returns pointers to static nul-terminated names.
            .map(|&ptr| unsafe { CStr::from_ptr(ptr) })
            .collect::<Vec<_>>();
        log::debug!("Number of extensions (window system): {}", window_extensions.len());

        let required_extensions =
            support::required_instance_extensions(&window_extensions, config.validation);

        let extension_props = unsafe { entry.enumerate_instance_extension_properties(None)? };
        log::debug!("Available extensions (Vulkan): {}", extension_props.len());
        for extension in &extension_props {
            if let Ok(name) = extension.extension_name_as_c_str() {
                log::debug!("\t{} {}", name.to_string_lossy(), extension.spec_version);
            }
        }

        let unsupported_extensions = support::find_unsupported(
            &required_extensions,
            &support::extension_names(&extension_props),
        );
        if !unsupported_extensions.is_empty() {
            return Err(InstanceCreateError::UnsupportedExtensions(
                support::to_owned_names(&unsupported_extensions),
            ));
        }

        let enabled_extension_names: Vec<*const c_char> =
            required_extensions.iter().map(|e| e.as_ptr()).collect();

        let layer_names = config
            .validation_layers
            .iter()
            .map(|layer| CString::new(layer.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut enabled_layers: Vec<*const c_char> = Vec::new();

        if config.validation {
            let layer_props = unsafe { entry.enumerate_instance_layer_properties()? };

            let required_layers: Vec<&CStr> = layer_names.iter().map(|l| l.as_c_str()).collect();
            let unsupported_layers = support::check_validation_layer_support(
                &required_layers,
                &support::layer_names(&layer_props),
            );

            if !unsupported_layers.is_empty() {
                return Err(InstanceCreateError::UnsupportedValidationLayers(
                    support::to_owned_names(&unsupported_layers),
                ));
            }

            enabled_layers = layer_names.iter().map(|l| l.as_ptr()).collect();
        }

        let mut instance_debug_info = debug::messenger_create_info();

        let mut create_info = ash::vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_extension_names(&enabled_extension_names)
            .enabled_layer_names(&enabled_layers);

        if config.validation {
            // Also covers messages from vkCreateInstance and vkDestroyInstance.
            create_info = create_info.push_next(&mut instance_debug_info);
        }

        log::debug!("Creating Vulkan instance...");
        let instance = unsafe { entry.create_instance(&create_info, None)? };

        let debug_objs = if config.validation {
            let utils = ash::ext::debug_utils::Instance::new(&entry, &instance);
            let messenger = unsafe {
                utils.create_debug_utils_messenger(&debug::messenger_create_info(), None)
            };

            match messenger {
                Ok(messenger) => Some(DebugObjs { utils, messenger }),
                Err(err) => {
                    unsafe { instance.destroy_instance(None) };
                    return Err(err.into());
                }
            }
        } else {
            None
        };

        Ok(Self {
            instance,
            debug_objs,
            _entry: entry,
        })
    }

    pub fn handle(&self) -> &ash::Instance {
        &self.instance
    }

    pub fn validation_enabled(&self) -> bool {
        self.debug_objs.is_some()
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        log::debug!("Destroying Vulkan instance...");
        unsafe {
            if let Some(debug_objs) = &self.debug_objs {
                debug_objs
                    .utils
                    .destroy_debug_utils_messenger(debug_objs.messenger, None);
            }
            self.instance.destroy_instance(None);
        }
    }
}
