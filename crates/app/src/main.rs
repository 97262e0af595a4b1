//! Entry point for Orbitview.
//! Logging setup and command-line flags.

use std::path::PathBuf;

use anyhow::Result;
use platform::RunConfig;

fn parse_backend(value: &str) -> wgpu::Backends {
    // Accept: auto|vulkan|dx12|metal|gl
    match value.to_ascii_lowercase().as_str() {
        "auto" => wgpu::Backends::all(),
        "vulkan" | "vk" => wgpu::Backends::VULKAN,
        "dx12" | "d3d12" => wgpu::Backends::DX12,
        "metal" | "mtl" => wgpu::Backends::METAL,
        "gl" | "opengl" | "gles" => wgpu::Backends::GL,
        other => {
            log::warn!("Unknown backend '{other}', falling back to auto.");
            wgpu::Backends::all()
        }
    }
}

fn parse_switch(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once('x').or_else(|| value.split_once('X'))?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Positive finite float, or `None` with a warning.
fn parse_positive(flag: &str, value: &str) -> Option<f32> {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => {
            log::warn!("Ignoring {flag}={value}: expected a positive number.");
            None
        }
    }
}

/// Builds the run configuration from `args` (program name excluded).
/// Unknown or malformed flags are ignored; the last occurrence wins.
fn parse_args(args: &[String]) -> RunConfig {
    let mut config = RunConfig::default();

    for arg in args {
        if let Some(v) = arg.strip_prefix("--gpu-backend=") {
            config.backends = parse_backend(v);
        } else if arg == "--show-fps" {
            config.show_fps = true;
        } else if let Some(v) = arg.strip_prefix("--show-fps=") {
            config.show_fps = parse_switch(v);
        } else if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((w, h)) = parse_size(v) {
                config.width = w;
                config.height = h;
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(w) = v.parse() {
                config.width = w;
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(h) = v.parse() {
                config.height = h;
            }
        } else if let Some(v) = arg.strip_prefix("--fov=") {
            if let Some(fov) = parse_positive("--fov", v).filter(|f| *f < 180.0) {
                config.projection.fov_y_degrees = fov;
            }
        } else if let Some(v) = arg.strip_prefix("--near=") {
            if let Some(near) = parse_positive("--near", v) {
                config.projection.near = near;
            }
        } else if let Some(v) = arg.strip_prefix("--far=") {
            if let Some(far) = parse_positive("--far", v) {
                config.projection.far = far;
            }
        } else if let Some(v) = arg.strip_prefix("--texture=") {
            config.texture = Some(PathBuf::from(v));
        } else {
            log::warn!("Unrecognized argument '{arg}'");
        }
    }

    config.width = config.width.max(1);
    config.height = config.height.max(1);
    if config.projection.far <= config.projection.near {
        log::warn!(
            "far ({}) must exceed near ({}); using defaults.",
            config.projection.far,
            config.projection.near
        );
        config.projection = Default::default();
    }
    config
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args);
    log::info!(
        "Starting Orbitview. Backend: {:?}, show_fps={}, window_size={}x{}, fov={}",
        config.backends,
        config.show_fps,
        config.width,
        config.height,
        config.projection.fov_y_degrees
    );

    platform::run_with_renderer(config)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        let config = parse_args(&[]);
        assert_eq!(config.backends, wgpu::Backends::all());
        assert!(!config.show_fps);
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.projection.fov_y_degrees, 45.0);
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.projection.far, 1000.0);
        assert!(config.texture.is_none());
    }

    #[test]
    fn backend_aliases() {
        assert_eq!(parse_backend("VK"), wgpu::Backends::VULKAN);
        assert_eq!(parse_backend("d3d12"), wgpu::Backends::DX12);
        assert_eq!(parse_backend("gles"), wgpu::Backends::GL);
        assert_eq!(parse_backend("nonsense"), wgpu::Backends::all());
    }

    #[test]
    fn show_fps_forms() {
        assert!(parse_args(&args(&["--show-fps"])).show_fps);
        assert!(parse_args(&args(&["--show-fps=on"])).show_fps);
        assert!(!parse_args(&args(&["--show-fps", "--show-fps=off"])).show_fps);
    }

    #[test]
    fn size_and_overrides() {
        let config = parse_args(&args(&["--size=800X600"]));
        assert_eq!((config.width, config.height), (800, 600));

        let config = parse_args(&args(&["--size=800x600", "--height=300"]));
        assert_eq!((config.width, config.height), (800, 300));

        let config = parse_args(&args(&["--size=garbage", "--width=0"]));
        assert_eq!((config.width, config.height), (1, 720));
    }

    #[test]
    fn projection_flags() {
        let config = parse_args(&args(&["--fov=60", "--near=0.5", "--far=200"]));
        assert_eq!(config.projection.fov_y_degrees, 60.0);
        assert_eq!(config.projection.near, 0.5);
        assert_eq!(config.projection.far, 200.0);

        let config = parse_args(&args(&["--fov=-1", "--near=abc"]));
        assert_eq!(config.projection.fov_y_degrees, 45.0);
        assert_eq!(config.projection.near, 0.1);
    }

    #[test]
    fn inverted_clip_planes_fall_back_to_defaults() {
        let config = parse_args(&args(&["--near=10", "--far=5", "--fov=70"]));
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.projection.far, 1000.0);
        assert_eq!(config.projection.fov_y_degrees, 45.0);
    }

    #[test]
    fn texture_path() {
        let config = parse_args(&args(&["--texture=assets/checker.png"]));
        assert_eq!(config.texture, Some(PathBuf::from("assets/checker.png")));
    }
}
