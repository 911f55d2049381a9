//! Rewrite arguments before the original body runs
//!
//! A before-callback doubles the requested volume and an after-callback
//! clamps the reported result. Run with:
//!
//! ```bash
//! cargo run --example rewrite_arguments
//! ```

use std::sync::Arc;

use hookpoint::{CallOutcome, ClassInfo, HostRuntime, LoaderId, MethodInfo, ResolvedHandle, Value};

const TARGET: &str = "com.sample.player.VolumeController";

struct DemoRuntime;

impl HostRuntime for DemoRuntime {
	fn find_class(&self, _loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>> {
		(name == TARGET).then(|| {
			let mut info = ClassInfo::new(name);
			info.methods = vec![MethodInfo {
				name: "setVolume".to_string(),
				param_types: vec!["int".to_string()],
				return_type: "int".to_string(),
				is_static: false,
			}];
			Arc::new(info)
		})
	}

	fn install_intercept(&self, _handle: &ResolvedHandle) -> hookpoint::Result<()> {
		Ok(())
	}

	fn invoke_original(&self, _handle: &ResolvedHandle, _receiver: Option<&Value>, args: &[Value]) -> CallOutcome {
		// The original echoes the level it applied.
		CallOutcome::Return(args[0].clone())
	}
}

fn main() -> hookpoint::Result<()> {
	let interceptor = hookpoint::new().runtime(Arc::new(DemoRuntime)).build()?;
	interceptor.attach(LoaderId(1), "com.sample.player");

	let handles = interceptor
		.class(TARGET)?
		.method("setVolume", ["int"])
		.before(|ctx| {
			let requested = ctx.arg(0).and_then(Value::as_int).unwrap_or(0);
			ctx.set_arg(0, Value::Int(requested * 2))
		})
		.after(|ctx| {
			let applied = ctx.result().and_then(Value::as_int).unwrap_or(0);
			ctx.set_result(Value::Int(applied.min(100)));
			Ok(())
		})
		.hook()?;

	for requested in [10, 40, 70] {
		let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(requested)]);
		println!("setVolume({requested}) -> {outcome:?}");
	}
	Ok(())
}
