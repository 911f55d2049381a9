//! Force a status check to report enabled
//!
//! The classic layered-patch move: an after-callback overwrites whatever
//! the original `isEnabled` returned. Run with:
//!
//! ```bash
//! cargo run --example force_enabled
//! ```

use std::sync::Arc;

use hookpoint::{CallOutcome, ClassInfo, HostRuntime, LoaderId, MethodInfo, ResolvedHandle, Value};

const TARGET: &str = "com.sample.module.ModuleStatus";

struct DemoRuntime;

impl HostRuntime for DemoRuntime {
	fn find_class(&self, _loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>> {
		(name == TARGET).then(|| {
			let mut info = ClassInfo::new(name);
			info.methods = vec![MethodInfo {
				name: "isEnabled".to_string(),
				param_types: vec![],
				return_type: "boolean".to_string(),
				is_static: true,
			}];
			Arc::new(info)
		})
	}

	fn install_intercept(&self, _handle: &ResolvedHandle) -> hookpoint::Result<()> {
		Ok(())
	}

	fn invoke_original(&self, _handle: &ResolvedHandle, _receiver: Option<&Value>, _args: &[Value]) -> CallOutcome {
		// The un-patched status check always says no.
		CallOutcome::Return(Value::Bool(false))
	}
}

fn main() -> hookpoint::Result<()> {
	let interceptor = hookpoint::new().runtime(Arc::new(DemoRuntime)).build()?;
	interceptor.attach(LoaderId(1), "com.sample.module");

	let handles = interceptor
		.class(TARGET)?
		.method("isEnabled", Vec::<&str>::new())
		.after(|ctx| {
			ctx.set_result(Value::Bool(true));
			Ok(())
		})
		.hook()?;

	let outcome = interceptor.dispatch(&handles[0], None, vec![]);
	println!("isEnabled() -> {outcome:?}");
	assert_eq!(outcome, CallOutcome::Return(Value::Bool(true)));
	Ok(())
}
