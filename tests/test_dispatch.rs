//! Registry and dispatch behavior: install idempotence, chain ordering,
//! short-circuiting, failure isolation and the end-to-end scenarios.

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex, mpsc};
use std::thread;

use common::{GatedInstallRuntime, LOADER, PACKAGE, SAMPLE, StubRuntime};
use hookpoint::{CallOutcome, HookError, Interceptor, ResolvedHandle, Thrown, Value};

fn attached(runtime: &Arc<StubRuntime>) -> Arc<Interceptor> {
	let interceptor = hookpoint::new().runtime(runtime.clone()).build().unwrap();
	interceptor.attach(LOADER, PACKAGE);
	interceptor
}

fn compute_int(interceptor: &Interceptor) -> ResolvedHandle {
	interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|_| Ok(()))
		.hook()
		.unwrap()
		.remove(0)
}

#[test]
fn install_happens_exactly_once_per_handle() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);
	let sample = interceptor.class(SAMPLE).unwrap();

	let first = sample.method("compute", ["int"]).before(|_| Ok(())).hook().unwrap();
	let second = sample.method("compute", ["int"]).after(|_| Ok(())).hook().unwrap();

	assert_eq!(first, second);
	assert_eq!(runtime.install_count(), 1);
	assert_eq!(interceptor.registry().bundle_count(&first[0]), 2);
	assert_eq!(interceptor.registry().entry_count(), 1);
}

#[test]
fn before_chain_is_last_writer_wins() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);
	let sample = interceptor.class(SAMPLE).unwrap();

	let handles = sample
		.method("compute", ["int"])
		.before(|ctx| {
			ctx.set_result(Value::Int(1));
			Ok(())
		})
		.hook()
		.unwrap();
	sample
		.method("compute", ["int"])
		.before(|ctx| {
			// observes the earlier registrant's value, then overrides it
			assert_eq!(ctx.result(), Some(&Value::Int(1)));
			ctx.set_result(Value::Int(2));
			Ok(())
		})
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);
	assert_eq!(outcome, CallOutcome::Return(Value::Int(2)));
	assert_eq!(runtime.original_call_count(), 0);
}

#[test]
fn skip_original_suppresses_the_real_body() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|ctx| {
			ctx.set_result(Value::Int(99));
			Ok(())
		})
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);
	assert_eq!(outcome, CallOutcome::Return(Value::Int(99)));
	assert_eq!(runtime.original_call_count(), 0);

	let stats = interceptor.stats().unwrap();
	assert_eq!(stats.total_dispatches, 1);
	assert_eq!(stats.skipped_originals, 1);
}

#[test]
fn failing_callback_is_isolated_from_the_rest_of_the_chain() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);
	let sample = interceptor.class(SAMPLE).unwrap();

	let later_before_ran = Arc::new(AtomicBool::new(false));
	let later_after_ran = Arc::new(AtomicBool::new(false));

	let handles = sample
		.method("compute", ["int"])
		.before(|_| Err(HookError::Callback("faulty patch".to_string())))
		.after(|_| Err(HookError::Callback("faulty patch".to_string())))
		.hook()
		.unwrap();
	let before_flag = Arc::clone(&later_before_ran);
	let after_flag = Arc::clone(&later_after_ran);
	sample
		.method("compute", ["int"])
		.before(move |_| {
			before_flag.store(true, Ordering::SeqCst);
			Ok(())
		})
		.after(move |ctx| {
			after_flag.store(true, Ordering::SeqCst);
			let n = ctx.result().and_then(Value::as_int).unwrap_or(0);
			ctx.set_result(Value::Int(n + 1));
			Ok(())
		})
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);
	// original ran (5 * 2), the surviving after-callback added one
	assert_eq!(outcome, CallOutcome::Return(Value::Int(11)));
	assert!(later_before_ran.load(Ordering::SeqCst));
	assert!(later_after_ran.load(Ordering::SeqCst));
	assert_eq!(interceptor.stats().unwrap().callback_failures, 2);
}

#[test]
fn all_callbacks_failing_still_returns_the_original_outcome() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|_| Err("broken before".into()))
		.after(|_| Err("broken after".into()))
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(4)]);
	assert_eq!(outcome, CallOutcome::Return(Value::Int(8)));
	assert_eq!(runtime.original_call_count(), 1);
}

#[test]
fn end_to_end_argument_and_result_rewrite() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|ctx| {
			let n = ctx.arg(0).and_then(Value::as_int).unwrap_or(0);
			ctx.set_arg(0, Value::Int(n * 2))
		})
		.after(|ctx| {
			let n = ctx.result().and_then(Value::as_int).unwrap_or(0);
			ctx.set_result(Value::Int(n + 1));
			Ok(())
		})
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);

	// the original saw the doubled argument and doubled it again
	assert_eq!(runtime.last_original_args.lock().unwrap().as_slice(), [Value::Int(10)]);
	assert_eq!(outcome, CallOutcome::Return(Value::Int(21)));
}

#[test]
fn match_all_fires_both_bundles_per_overload_in_order() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);
	let sample = interceptor.class(SAMPLE).unwrap();

	let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
	let first = Arc::clone(&log);
	let handles = sample
		.method_all("compute")
		.before(move |_| {
			first.lock().unwrap().push("b1");
			Ok(())
		})
		.hook()
		.unwrap();
	let second = Arc::clone(&log);
	sample
		.method_all("compute")
		.before(move |_| {
			second.lock().unwrap().push("b2");
			Ok(())
		})
		.hook()
		.unwrap();

	assert_eq!(handles.len(), 3);
	for handle in &handles {
		log.lock().unwrap().clear();
		let args = vec![Value::Int(1); handle.arity()];
		interceptor.dispatch(handle, None, args);
		assert_eq!(log.lock().unwrap().as_slice(), ["b1", "b2"]);
	}
	assert_eq!(runtime.install_count(), 3);
}

#[test]
fn after_callback_replaces_thrown_with_result() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("fail", Vec::<&str>::new())
		.after(|ctx| {
			assert!(ctx.thrown().is_some());
			ctx.set_result(Value::Str("recovered".to_string()));
			Ok(())
		})
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![]);
	assert_eq!(outcome, CallOutcome::Return(Value::Str("recovered".to_string())));
}

#[test]
fn before_callback_can_raise_instead_of_calling_the_original() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|ctx| {
			ctx.set_thrown(Thrown::new("java.lang.SecurityException", "denied"));
			Ok(())
		})
		.hook()
		.unwrap();

	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);
	assert_eq!(
		outcome,
		CallOutcome::Thrown(Thrown::new("java.lang.SecurityException", "denied"))
	);
	assert_eq!(runtime.original_call_count(), 0);
}

#[test]
fn unregistered_handle_passes_through_to_the_original() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let handle = interceptor
		.resolver()
		.unwrap()
		.resolve(&hookpoint::MemberDescriptor::method(SAMPLE, "name", Vec::<&str>::new()))
		.unwrap()
		.remove(0);

	let outcome = interceptor.dispatch(&handle, None, vec![]);
	assert_eq!(outcome, CallOutcome::Return(Value::Str("sample".to_string())));
	assert_eq!(runtime.original_call_count(), 1);
	assert_eq!(interceptor.stats().unwrap().total_dispatches, 0);
}

#[test]
fn install_failure_surfaces_and_leaves_no_entry() {
	let runtime = StubRuntime::failing_install();
	let interceptor = attached(&runtime);

	let err = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|_| Ok(()))
		.hook()
		.unwrap_err();

	assert!(matches!(err, HookError::Install { .. }));
	assert_eq!(interceptor.registry().entry_count(), 0);
}

#[test]
fn constructor_hooks_dispatch_like_methods() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let seen = Arc::new(AtomicBool::new(false));
	let flag = Arc::clone(&seen);
	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.constructors_all()
		.before(move |_| {
			flag.store(true, Ordering::SeqCst);
			Ok(())
		})
		.hook()
		.unwrap();
	assert_eq!(handles.len(), 2);
	assert_eq!(runtime.install_count(), 2);

	let outcome = interceptor.dispatch(&handles[1], None, vec![Value::Int(3)]);
	assert!(seen.load(Ordering::SeqCst));
	assert!(matches!(outcome, CallOutcome::Return(Value::Object { .. })));
}

#[test]
fn bundle_without_callbacks_is_rejected() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let err = interceptor.class(SAMPLE).unwrap().method("compute", ["int"]).hook().unwrap_err();

	assert!(matches!(err, HookError::Other(_)));
	assert_eq!(runtime.install_count(), 0);
	assert_eq!(interceptor.registry().entry_count(), 0);
}

#[test]
fn concurrent_first_registrations_install_exactly_once() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);

	let barrier = Arc::new(Barrier::new(4));
	let threads: Vec<_> = (0..4)
		.map(|_| {
			let interceptor = Arc::clone(&interceptor);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				interceptor
					.class(SAMPLE)
					.unwrap()
					.method("compute", ["int"])
					.before(|_| Ok(()))
					.hook()
					.unwrap()
					.remove(0)
			})
		})
		.collect();
	let handles: Vec<ResolvedHandle> = threads.into_iter().map(|t| t.join().unwrap()).collect();

	assert_eq!(runtime.install_count(), 1);
	assert_eq!(interceptor.registry().bundle_count(&handles[0]), 4);
	assert_eq!(interceptor.registry().entry_count(), 1);
}

#[test]
fn registration_racing_an_in_flight_install_only_appends() {
	let (runtime, started, release) = GatedInstallRuntime::new();
	let interceptor = hookpoint::new().runtime(runtime.clone()).build().unwrap();
	interceptor.attach(LOADER, PACKAGE);
	runtime.close_gate();

	let worker = {
		let interceptor = Arc::clone(&interceptor);
		thread::spawn(move || {
			interceptor
				.class(SAMPLE)
				.unwrap()
				.method("compute", ["int"])
				.before(|_| Ok(()))
				.hook()
				.unwrap();
		})
	};

	// the first registrant is parked inside the host runtime's install
	started.recv().unwrap();
	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.after(|_| Ok(()))
		.hook()
		.unwrap();
	assert_eq!(runtime.inner.install_count(), 0);
	assert_eq!(interceptor.registry().bundle_count(&handles[0]), 2);

	release.send(()).unwrap();
	worker.join().unwrap();
	assert_eq!(runtime.inner.install_count(), 1);
}

#[test]
fn dispatch_is_not_stalled_by_a_slow_install_on_another_handle() {
	let (runtime, started, release) = GatedInstallRuntime::new();
	let interceptor = hookpoint::new().runtime(runtime.clone()).build().unwrap();
	interceptor.attach(LOADER, PACKAGE);

	let handles = interceptor
		.class(SAMPLE)
		.unwrap()
		.method("compute", ["int"])
		.before(|_| Ok(()))
		.hook()
		.unwrap();
	runtime.close_gate();

	let worker = {
		let interceptor = Arc::clone(&interceptor);
		thread::spawn(move || {
			interceptor
				.class(SAMPLE)
				.unwrap()
				.method("name", Vec::<&str>::new())
				.before(|_| Ok(()))
				.hook()
				.unwrap();
		})
	};

	// the unrelated handle's install is parked inside the host runtime;
	// a dispatch on the already-installed handle must still complete
	started.recv().unwrap();
	let outcome = interceptor.dispatch(&handles[0], None, vec![Value::Int(5)]);
	assert_eq!(outcome, CallOutcome::Return(Value::Int(10)));

	release.send(()).unwrap();
	worker.join().unwrap();
	assert_eq!(runtime.inner.install_count(), 2);
}

#[test]
fn registration_during_dispatch_is_not_visible_mid_iteration() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);
	let sample = interceptor.class(SAMPLE).unwrap();

	let (in_dispatch_tx, in_dispatch_rx) = mpsc::channel();
	let (resume_tx, resume_rx) = mpsc::channel::<()>();
	let resume_rx = Mutex::new(resume_rx);
	let handles = sample
		.method("compute", ["int"])
		.before(move |_| {
			in_dispatch_tx.send(()).unwrap();
			resume_rx.lock().unwrap().recv().unwrap();
			Ok(())
		})
		.hook()
		.unwrap();

	let handle = handles[0].clone();
	let dispatcher = {
		let interceptor = Arc::clone(&interceptor);
		let handle = handle.clone();
		thread::spawn(move || interceptor.dispatch(&handle, None, vec![Value::Int(5)]))
	};

	// the dispatch is parked inside its before-callback; append a bundle
	in_dispatch_rx.recv().unwrap();
	let late_ran = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&late_ran);
	sample
		.method("compute", ["int"])
		.before(move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(())
		})
		.hook()
		.unwrap();

	resume_tx.send(()).unwrap();
	let outcome = dispatcher.join().unwrap();
	assert_eq!(outcome, CallOutcome::Return(Value::Int(10)));
	assert_eq!(late_ran.load(Ordering::SeqCst), 0);

	// the next dispatch snapshots again and sees the appended bundle
	resume_tx.send(()).unwrap();
	interceptor.dispatch(&handle, None, vec![Value::Int(5)]);
	assert_eq!(late_ran.load(Ordering::SeqCst), 1);
}

#[test]
fn dispatch_counts_accumulate_per_handle() {
	let runtime = StubRuntime::new();
	let interceptor = attached(&runtime);
	let handle = compute_int(&interceptor);

	for n in 0..4 {
		interceptor.dispatch(&handle, None, vec![Value::Int(n)]);
	}

	let stats = interceptor.stats().unwrap();
	assert_eq!(stats.total_dispatches, 4);
	assert_eq!(stats.dispatch_counts.get(&handle), Some(&4));
}
