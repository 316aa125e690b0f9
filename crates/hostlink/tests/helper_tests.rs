//! End-to-end tests: configuration file -> bridge -> helper functions

use std::io::Write;
use std::sync::Arc;
use std::thread;

use hostlink::{ConfigError, HelperFunctions, InteropBridge, InteropConfig, TypeDef, TypeRegistry};
use hostlink_sdk::{ErrorKind, ObjectHandle, ScriptValue, TypeHandle};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn setup(config: &InteropConfig) -> (Arc<TypeRegistry>, Option<HelperFunctions>) {
    let registry = Arc::new(TypeRegistry::new());
    let bridge = Arc::new(InteropBridge::new(config.to_options(), registry.clone()));
    (registry, HelperFunctions::from_config(bridge, config))
}

#[test]
fn test_config_file_enables_introspection() {
    let file = write_config(
        r#"
[engine]
strict = true

[interop]
allow_get_type = true
helper_name = "clrHelper"
"#,
    );
    let config = InteropConfig::from_file(file.path()).unwrap();
    let (registry, helpers) = setup(&config);
    let helpers = helpers.unwrap();
    assert_eq!(helpers.helper_name(), "clrHelper");

    let list = registry
        .register(TypeDef::class("Host.Collections.List"))
        .unwrap();
    let obj = ScriptValue::Object(ObjectHandle::new(registry.instantiate(&list, None).unwrap()));

    let ty = helpers.call("typeOf", &[obj]).unwrap();
    assert_eq!(ty, ScriptValue::Type(TypeHandle::new(list.clone())));

    let static_view = helpers.call("typeToObject", &[ty.clone()]).unwrap();
    assert_eq!(helpers.call("objectToType", &[static_view]).unwrap(), ty);
}

#[test]
fn test_default_config_is_sandboxed() {
    let file = write_config("[engine]\nstrict = true\n");
    let config = InteropConfig::from_file(file.path()).unwrap();
    let (registry, helpers) = setup(&config);
    let helpers = helpers.unwrap();

    let point = registry.register(TypeDef::structure("Geo.Point")).unwrap();
    let obj = ScriptValue::Object(ObjectHandle::new(registry.instantiate(&point, None).unwrap()));

    let err = helpers.call("typeOf", &[obj.clone()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    // casts stay available
    let unwrapped = helpers.call("unwrap", &[obj.clone()]).unwrap();
    assert_eq!(unwrapped, obj);
    assert_eq!(
        helpers.call("toString", &[obj]).unwrap(),
        ScriptValue::from("Geo.Point")
    );
}

#[test]
fn test_helper_not_exposed() {
    let config = InteropConfig::from_str("[interop]\nexpose_helper = false\n").unwrap();
    let (_, helpers) = setup(&config);
    assert!(helpers.is_none());
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = InteropConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_wrap_via_helpers() {
    let config = InteropConfig::from_str("[interop]\nallow_get_type = true\n").unwrap();
    let (registry, helpers) = setup(&config);
    let helpers = helpers.unwrap();

    let disposable = registry.register(TypeDef::interface("Io.IDisposable")).unwrap();
    let stream = registry
        .register(TypeDef::class("Io.Stream").implements(&disposable))
        .unwrap();
    let other = registry.register(TypeDef::interface("Io.IOther")).unwrap();
    let obj = ScriptValue::Object(ObjectHandle::new(
        registry.instantiate(&stream, None).unwrap(),
    ));

    let wrapped = helpers
        .call(
            "wrap",
            &[obj.clone(), ScriptValue::Type(TypeHandle::new(disposable.clone()))],
        )
        .unwrap();
    assert_eq!(wrapped.as_object().unwrap().declared_type(), &disposable);

    let err = helpers
        .call("wrap", &[obj, ScriptValue::Type(TypeHandle::new(other))])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    // narrowing does not change what typeOf reports
    let ty = helpers.call("typeOf", &[wrapped]).unwrap();
    assert_eq!(ty, ScriptValue::Type(TypeHandle::new(stream)));
}

#[test]
fn test_concurrent_calls() {
    let config = InteropConfig::from_str("[interop]\nallow_get_type = true\n").unwrap();
    let (registry, helpers) = setup(&config);
    let helpers = Arc::new(helpers.unwrap());

    let iface = registry.register(TypeDef::interface("Par.IWork")).unwrap();
    let worker = registry
        .register(TypeDef::class("Par.Worker").implements(&iface))
        .unwrap();

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let helpers = helpers.clone();
            let registry = registry.clone();
            let iface = iface.clone();
            let worker = worker.clone();
            thread::spawn(move || {
                let obj = registry
                    .instantiate(&worker, Some(format!("worker-{}", i)))
                    .unwrap();
                let value = ScriptValue::Object(ObjectHandle::new(obj));
                for _ in 0..100 {
                    let wrapped = helpers
                        .call("wrap", &[value.clone(), ScriptValue::Type(TypeHandle::new(iface.clone()))])
                        .unwrap();
                    let ty = helpers.call("typeOf", &[wrapped]).unwrap();
                    assert_eq!(ty, ScriptValue::Type(TypeHandle::new(worker.clone())));
                    let view = helpers.call("typeToObject", &[ty]).unwrap();
                    assert!(view.as_object().unwrap().target().is_type());
                }
                helpers.call("toString", &[value]).unwrap()
            })
        })
        .collect();

    for (i, handle) in threads.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            ScriptValue::from(format!("worker-{}", i))
        );
    }
}
