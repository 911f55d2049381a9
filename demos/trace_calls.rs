//! Trace every call to a class's methods
//!
//! Hooks every declared method of the target class and logs receiver,
//! arguments and final result without disturbing the call. The privileged
//! runtime is simulated by a small in-process stub so the demo can drive
//! dispatches itself:
//!
//! ```bash
//! HOOKPOINT_DEBUG=1 cargo run --example trace_calls
//! ```

use std::sync::Arc;

use hookpoint::{CallOutcome, ClassInfo, HostRuntime, LoaderId, MethodInfo, ResolvedHandle, Value};

const TARGET: &str = "com.sample.player.PlaybackService";

struct DemoRuntime;

impl HostRuntime for DemoRuntime {
	fn find_class(&self, _loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>> {
		(name == TARGET).then(|| {
			let mut info = ClassInfo::new(name);
			info.methods = vec![
				MethodInfo {
					name: "play".to_string(),
					param_types: vec!["java.lang.String".to_string()],
					return_type: "boolean".to_string(),
					is_static: false,
				},
				MethodInfo {
					name: "seek".to_string(),
					param_types: vec!["long".to_string()],
					return_type: "void".to_string(),
					is_static: false,
				},
			];
			Arc::new(info)
		})
	}

	fn install_intercept(&self, handle: &ResolvedHandle) -> hookpoint::Result<()> {
		println!("[runtime] intercept installed on {handle}");
		Ok(())
	}

	fn invoke_original(&self, handle: &ResolvedHandle, _receiver: Option<&Value>, _args: &[Value]) -> CallOutcome {
		match handle.name.as_str() {
			"play" => CallOutcome::Return(Value::Bool(true)),
			_ => CallOutcome::Return(Value::Null),
		}
	}
}

fn main() -> hookpoint::Result<()> {
	let interceptor = hookpoint::new().runtime(Arc::new(DemoRuntime)).trace(true).build()?;
	interceptor.attach(LoaderId(1), "com.sample.player");

	let handles = interceptor
		.class(TARGET)?
		.methods_all()
		.before(|ctx| {
			println!("[hook] -> {} args={:?}", ctx.handle(), ctx.args());
			Ok(())
		})
		.after(|ctx| {
			println!("[hook] <- {} result={:?}", ctx.handle(), ctx.result());
			Ok(())
		})
		.hook()?;

	// Simulate the host runtime routing real calls through dispatch.
	for handle in &handles {
		let args = match handle.name.as_str() {
			"play" => vec![Value::Str("track-01".to_string())],
			_ => vec![Value::Int(30_000)],
		};
		interceptor.dispatch(handle, None, args);
	}

	let stats = interceptor.stats().unwrap_or_default();
	println!("dispatched {} calls across {} handles", stats.total_dispatches, handles.len());
	Ok(())
}
