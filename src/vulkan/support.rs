use std::ffi::CStr;

pub fn layer_names(props: &[ash::vk::LayerProperties]) -> Vec<&CStr> {
    props
        .iter()
        .filter_map(|layer| match layer.layer_name_as_c_str() {
            Ok(name) => Some(name),
            Err(_) => {
                log::warn!("skipping layer with an invalid name");
                None
            }
        })
        .collect()
}

pub fn extension_names(props: &[ash::vk::ExtensionProperties]) -> Vec<&CStr> {
    props
        .iter()
        .filter_map(|extension| match extension.extension_name_as_c_str() {
            Ok(name) => Some(name),
            Err(_) => {
                log::warn!("skipping extension with an invalid name");
                None
            }
        })
        .collect()
}

/// Returns every name in `required` that is missing from `available`, in the
/// order it was required.
pub fn find_unsupported<'a>(required: &[&'a CStr], available: &[&CStr]) -> Vec<&'a CStr> {
    required
        .iter()
        .copied()
        .filter(|required| !available.iter().any(|name| name == required))
        .collect()
}

pub fn check_validation_layer_support<'a>(
    required: &[&'a CStr],
    available: &[&CStr],
) -> Vec<&'a CStr> {
    log::debug!("Available layers:");
    for name in available {
        log::debug!("\t{}", name.to_string_lossy());
    }

    let unsupported = find_unsupported(required, available);

    for layer in required {
        let status = if unsupported.contains(layer) {
            "NOT FOUND"
        } else {
            "FOUND"
        };
        log::debug!("\t{} {status}", layer.to_string_lossy());
    }

    unsupported
}

/// The window system's extensions (deduplicated, order kept), plus debug utils
/// when validation is on.
pub fn required_instance_extensions<'a>(
    window_extensions: &[&'a CStr],
    validation: bool,
) -> Vec<&'a CStr> {
    let mut required: Vec<&CStr> = Vec::with_capacity(window_extensions.len() + 1);

    for extension in window_extensions {
        if !required.contains(extension) {
            required.push(*extension);
        }
    }

    if validation && !required.contains(&ash::ext::debug_utils::NAME) {
        required.push(ash::ext::debug_utils::NAME);
    }

    required
}

pub fn to_owned_names(names: &[&CStr]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}
