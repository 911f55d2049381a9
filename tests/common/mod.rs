//! Shared test fixtures
//!
//! A counting stub host runtime with a small fixed class table standing
//! in for the privileged runtime, plus the fixture identities the test
//! binaries share.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use hookpoint::{
	CallOutcome, ClassInfo, ConstructorInfo, FieldHandle, FieldInfo, HookError, HostRuntime, LoaderId, MethodInfo,
	ResolvedHandle, Thrown, Value,
};

pub const SAMPLE: &str = "com.sample.Sample";
pub const PACKAGE: &str = "com.sample.app";
pub const LOADER: LoaderId = LoaderId(7);

fn method(name: &str, params: &[&str], return_type: &str) -> MethodInfo {
	MethodInfo {
		name: name.to_string(),
		param_types: params.iter().map(ToString::to_string).collect(),
		return_type: return_type.to_string(),
		is_static: false,
	}
}

fn field(name: &str, field_type: &str) -> FieldInfo {
	FieldInfo {
		name: name.to_string(),
		field_type: field_type.to_string(),
	}
}

fn sample_class() -> ClassInfo {
	let mut info = ClassInfo::new(SAMPLE);
	info.superclass = Some("java.lang.Object".to_string());
	info.methods = vec![
		method("compute", &[], "int"),
		method("compute", &["int"], "int"),
		method("compute", &["int", "int"], "int"),
		method("name", &[], "java.lang.String"),
		method("fail", &[], "void"),
		method("makeView", &[], "com.sample.View"),
		method("makeButton", &[], "com.sample.Button"),
	];
	info.constructors = vec![
		ConstructorInfo { param_types: vec![] },
		ConstructorInfo {
			param_types: vec!["int".to_string()],
		},
	];
	info.fields = vec![
		field("label", "java.lang.String"),
		field("count", "int"),
		field("view", "com.sample.View"),
		field("button", "com.sample.Button"),
	];
	info
}

fn plain_class(name: &str, superclass: Option<&str>) -> ClassInfo {
	let mut info = ClassInfo::new(name);
	info.superclass = superclass.map(ToString::to_string);
	info
}

/// Counting stub host runtime over a fixed class table
///
/// The stub original for `compute` doubles a single argument, sums two,
/// and returns 7 for the no-argument overload; `fail` always raises.
pub struct StubRuntime {
	classes: HashMap<String, Arc<ClassInfo>>,
	pub find_class_calls: AtomicUsize,
	pub installs: AtomicUsize,
	pub original_calls: AtomicUsize,
	pub relaxed: Mutex<Vec<String>>,
	pub relaxed_fields: Mutex<Vec<String>>,
	pub last_original_args: Mutex<Vec<Value>>,
	pub fail_install: bool,
}

impl StubRuntime {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::build(false))
	}

	pub fn failing_install() -> Arc<Self> {
		Arc::new(Self::build(true))
	}

	fn build(fail_install: bool) -> Self {
		let mut classes = HashMap::new();
		for info in [
			sample_class(),
			plain_class("java.lang.Object", None),
			plain_class("com.sample.View", Some("java.lang.Object")),
			plain_class("com.sample.Button", Some("com.sample.View")),
		] {
			classes.insert(info.name.clone(), Arc::new(info));
		}
		Self {
			classes,
			find_class_calls: AtomicUsize::new(0),
			installs: AtomicUsize::new(0),
			original_calls: AtomicUsize::new(0),
			relaxed: Mutex::new(Vec::new()),
			relaxed_fields: Mutex::new(Vec::new()),
			last_original_args: Mutex::new(Vec::new()),
			fail_install,
		}
	}

	pub fn install_count(&self) -> usize {
		self.installs.load(Ordering::SeqCst)
	}

	pub fn original_call_count(&self) -> usize {
		self.original_calls.load(Ordering::SeqCst)
	}
}

/// Stub runtime whose installs can be parked inside the host-runtime call
///
/// With the gate closed, `install_intercept` reports on the started
/// channel and then blocks until released, pinning the installing thread
/// at a known point inside the host runtime.
pub struct GatedInstallRuntime {
	pub inner: Arc<StubRuntime>,
	gate: AtomicBool,
	started: Mutex<mpsc::Sender<()>>,
	release: Mutex<mpsc::Receiver<()>>,
}

impl GatedInstallRuntime {
	pub fn new() -> (Arc<Self>, mpsc::Receiver<()>, mpsc::Sender<()>) {
		let (started_tx, started_rx) = mpsc::channel();
		let (release_tx, release_rx) = mpsc::channel();
		let runtime = Arc::new(Self {
			inner: StubRuntime::new(),
			gate: AtomicBool::new(false),
			started: Mutex::new(started_tx),
			release: Mutex::new(release_rx),
		});
		(runtime, started_rx, release_tx)
	}

	/// Make every later install park until released
	pub fn close_gate(&self) {
		self.gate.store(true, Ordering::SeqCst);
	}
}

impl HostRuntime for GatedInstallRuntime {
	fn find_class(&self, loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>> {
		self.inner.find_class(loader, name)
	}

	fn relax_access(&self, handle: &ResolvedHandle) {
		self.inner.relax_access(handle);
	}

	fn relax_access_field(&self, field: &FieldHandle) {
		self.inner.relax_access_field(field);
	}

	fn install_intercept(&self, handle: &ResolvedHandle) -> hookpoint::Result<()> {
		if self.gate.load(Ordering::SeqCst) {
			self.started.lock().unwrap().send(()).unwrap();
			self.release.lock().unwrap().recv().unwrap();
		}
		self.inner.install_intercept(handle)
	}

	fn invoke_original(&self, handle: &ResolvedHandle, receiver: Option<&Value>, args: &[Value]) -> CallOutcome {
		self.inner.invoke_original(handle, receiver, args)
	}
}

impl HostRuntime for StubRuntime {
	fn find_class(&self, _loader: LoaderId, name: &str) -> Option<Arc<ClassInfo>> {
		self.find_class_calls.fetch_add(1, Ordering::SeqCst);
		self.classes.get(name).cloned()
	}

	fn relax_access(&self, handle: &ResolvedHandle) {
		self.relaxed.lock().unwrap().push(handle.to_string());
	}

	fn relax_access_field(&self, field: &FieldHandle) {
		self.relaxed_fields.lock().unwrap().push(field.name.clone());
	}

	fn install_intercept(&self, handle: &ResolvedHandle) -> hookpoint::Result<()> {
		if self.fail_install {
			return Err(HookError::Install {
				handle: handle.to_string(),
				reason: "runtime refused".to_string(),
			});
		}
		self.installs.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	fn invoke_original(&self, handle: &ResolvedHandle, _receiver: Option<&Value>, args: &[Value]) -> CallOutcome {
		self.original_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_original_args.lock().unwrap() = args.to_vec();
		match (handle.name.as_str(), args.len()) {
			("compute", 0) => CallOutcome::Return(Value::Int(7)),
			("compute", 1) => CallOutcome::Return(Value::Int(args[0].as_int().unwrap_or(0) * 2)),
			("compute", 2) => {
				let a = args[0].as_int().unwrap_or(0);
				let b = args[1].as_int().unwrap_or(0);
				CallOutcome::Return(Value::Int(a + b))
			},
			("name", _) => CallOutcome::Return(Value::Str("sample".to_string())),
			("fail", _) => CallOutcome::Thrown(Thrown::new("java.lang.IllegalStateException", "original failed")),
			("<init>", _) => CallOutcome::Return(Value::Object {
				class_name: handle.class_name.clone(),
				id: 1,
			}),
			_ => CallOutcome::Return(Value::Null),
		}
	}
}
