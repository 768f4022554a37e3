use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks the surface format whose sRGB-ness matches `prefer_srgb`.
///
/// With `prefer_srgb == false` the fragment output is stored as written, with
/// no linear-to-sRGB encode on store. Falls back to the first supported format.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Returns the surface configuration for `new_size`, or `None` when nothing
/// should be reconfigured (minimized window or unchanged size).
pub(crate) fn resized_config(
    config: &wgpu::SurfaceConfiguration,
    new_size: PhysicalSize<u32>,
) -> Option<wgpu::SurfaceConfiguration> {
    if new_size.width == 0 || new_size.height == 0 {
        return None;
    }
    if new_size.width == config.width && new_size.height == config.height {
        return None;
    }

    let mut next = config.clone();
    next.width = new_size.width;
    next.height = new_size.height;
    Some(next)
}

/// Maps a frame acquisition failure to what the host should do next.
///
/// Lost/outdated surfaces are reconfigured in place with the current config,
/// unless the window is minimized (zero size).
pub(crate) fn recover_from_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
