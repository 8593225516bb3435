//! Shader module and pipeline creation with validation capture.
//!
//! Compilation or link (pipeline validation) failure is fatal: the diagnostic
//! text is logged and returned as an error. No partially valid pipeline is
//! ever handed to a renderer.

use std::fmt::Write as _;

use anyhow::{bail, Result};

/// Runs `create` inside a validation error scope.
///
/// Returns `Err` if wgpu reported a validation error for anything created
/// inside the scope.
pub(super) fn validated<T>(
    device: &wgpu::Device,
    what: &str,
    create: impl FnOnce() -> T,
) -> Result<T> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();

    if let Some(err) = pollster::block_on(scope.pop()) {
        log::error!("{what} failed validation:\n{err}");
        bail!("{what} failed validation: {err}");
    }

    Ok(value)
}

/// Compiles WGSL `source` into a shader module.
///
/// Warnings are logged and tolerated; any error message fails the call.
pub(super) fn compile_wgsl(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let scope_err = pollster::block_on(scope.pop());

    let info = pollster::block_on(module.get_compilation_info());

    for msg in &info.messages {
        if msg.message_type == wgpu::CompilationMessageType::Warning {
            log::warn!("{label}: {}", format_message(msg));
        }
    }

    // The compiler's messages carry source locations; report those first.
    if let Some(report) = error_report(label, &info.messages) {
        log::error!("{report}");
        bail!("{report}");
    }

    if let Some(err) = scope_err {
        log::error!("shader {label:?} failed validation:\n{err}");
        bail!("shader {label:?} failed validation: {err}");
    }

    log::debug!("compiled shader {label:?}");
    Ok(module)
}

/// Builds a multi-line report of all error messages, or `None` if there are none.
fn error_report(label: &str, messages: &[wgpu::CompilationMessage]) -> Option<String> {
    let errors: Vec<_> = messages
        .iter()
        .filter(|m| m.message_type == wgpu::CompilationMessageType::Error)
        .collect();

    if errors.is_empty() {
        return None;
    }

    let mut out = format!("shader {label:?} failed to compile ({} error(s))", errors.len());
    for msg in errors {
        // Writing to a String cannot fail.
        let _ = write!(out, "\n  {}", format_message(msg));
    }
    Some(out)
}

fn format_message(msg: &wgpu::CompilationMessage) -> String {
    match msg.location {
        Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, msg.message),
        None => msg.message.clone(),
    }
}

/// Stub device on the noop backend. Shader parsing and validation still run.
#[cfg(test)]
pub(super) fn noop_device() -> (wgpu::Device, wgpu::Queue) {
    wgpu::Device::noop(&wgpu::DeviceDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompilationMessage, CompilationMessageType, SourceLocation};

    fn msg(kind: CompilationMessageType, text: &str, at: Option<(u32, u32)>) -> CompilationMessage {
        CompilationMessage {
            message: text.to_string(),
            message_type: kind,
            location: at.map(|(line, col)| SourceLocation {
                line_number: line,
                line_position: col,
                offset: 0,
                length: 1,
            }),
        }
    }

    #[test]
    fn no_messages_no_report() {
        assert_eq!(error_report("tri", &[]), None);
    }

    #[test]
    fn warnings_alone_do_not_fail() {
        let msgs = [msg(CompilationMessageType::Warning, "unused variable", Some((3, 5)))];
        assert_eq!(error_report("tri", &msgs), None);
    }

    #[test]
    fn report_lists_errors_with_locations() {
        let msgs = [
            msg(CompilationMessageType::Info, "note", None),
            msg(CompilationMessageType::Error, "expected ';'", Some((12, 9))),
            msg(CompilationMessageType::Error, "unknown type", None),
        ];
        let report = error_report("gasket triangle shader", &msgs).unwrap();
        assert_eq!(
            report,
            "shader \"gasket triangle shader\" failed to compile (2 error(s))\n  12:9: expected ';'\n  unknown type"
        );
    }

    #[test]
    fn invalid_wgsl_fails_with_location() {
        let (device, _queue) = noop_device();
        let err = compile_wgsl(&device, "broken", "@vertex\nfn vs_main( {\n").unwrap_err();
        let text = err.to_string();

        assert!(text.starts_with("shader \"broken\" failed to compile (1 error(s))"), "{text}");
        // The parser stops on line 2.
        assert!(text.contains("\n  2:"), "{text}");
    }

    #[test]
    fn bundled_shader_compiles() {
        let (device, _queue) = noop_device();
        let src = include_str!("shaders/triangle.wgsl");
        assert!(compile_wgsl(&device, "gasket triangle shader", src).is_ok());
    }

    #[test]
    fn bundled_shader_declares_entry_points() {
        let src = include_str!("shaders/triangle.wgsl");
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
        assert!(src.contains("@group(0) @binding(0)"));
    }
}
