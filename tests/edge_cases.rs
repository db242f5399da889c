use launch_inventory::{
    extract_inventory, extract_nodes, extract_parameters, substitution::StaticLocator,
    ExtractError, ExtractOptions, LocateError, PathResolver,
};
use std::{fs, io::Write, path::Path, time::Duration};
use tempfile::{NamedTempFile, TempDir};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn demo_resolver(dir: &TempDir) -> PathResolver {
    PathResolver::new(StaticLocator::new().with_package("demo", dir.path()))
}

#[test]
fn test_empty_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"").unwrap();
    file.flush().unwrap();

    let result = extract_parameters(file.path(), &PathResolver::new(StaticLocator::new()));
    assert!(matches!(result, Err(ExtractError::MalformedDescriptor { .. })));
}

#[test]
fn test_malformed_xml() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"<launch>\n  <node pkg=\"test\" name=\"test\"\n</launch>")
        .unwrap();
    file.flush().unwrap();

    let err = extract_nodes(file.path(), &PathResolver::new(StaticLocator::new())).unwrap_err();
    let err_msg = err.to_string();
    assert!(
        err_msg.contains("Malformed launch file"),
        "Error should mention the malformed file: {}",
        err_msg
    );
    assert_eq!(err.file().map(|p| p.as_path()), Some(file.path()));
}

#[test]
fn test_missing_root_file() {
    let result = extract_nodes(
        Path::new("/nonexistent/root.launch"),
        &PathResolver::new(StaticLocator::new()),
    );
    assert!(matches!(result, Err(ExtractError::DescriptorRead { .. })));
}

#[test]
fn test_malformed_included_file_aborts() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.launch",
        r#"<launch><node pkg="p" name="n"/><include file="$(find demo)/bad.launch"/></launch>"#,
    );
    write(dir.path(), "bad.launch", "<launch><param name=\"x\"</launch>");

    let err = extract_nodes(&dir.path().join("root.launch"), &demo_resolver(&dir)).unwrap_err();
    match err {
        ExtractError::MalformedDescriptor { file, .. } => {
            assert!(file.ends_with("bad.launch"), "{}", file.display())
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unresolvable_include_reports_origin() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.launch",
        r#"<launch><include file="$(find ghost)/x.launch"/></launch>"#,
    );
    let root = dir.path().join("root.launch");

    let err = extract_nodes(&root, &demo_resolver(&dir)).unwrap_err();
    match err {
        ExtractError::PackageResolution {
            package,
            reference,
            file,
            source,
        } => {
            assert_eq!(package, "ghost");
            assert_eq!(reference, "$(find ghost)/x.launch");
            assert_eq!(file, root);
            assert_eq!(source, LocateError::PackageNotFound("ghost".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unresolvable_rosparam() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.launch",
        r#"<launch><rosparam file="$(find ghost)/cfg.yaml" command="load"/></launch>"#,
    );

    let root = dir.path().join("root.launch");
    let err = extract_parameters(&root, &demo_resolver(&dir)).unwrap_err();
    assert!(matches!(err, ExtractError::PackageResolution { .. }));
}

#[test]
fn test_malformed_rosparam_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.launch",
        r#"<launch><rosparam file="$(find demo)/cfg.yaml" command="load"/></launch>"#,
    );
    write(dir.path(), "cfg.yaml", "just a scalar\n");

    let root = dir.path().join("root.launch");
    let err = extract_parameters(&root, &demo_resolver(&dir)).unwrap_err();
    assert!(matches!(err, ExtractError::ExternalFormat { .. }));
}

#[test]
fn test_cyclic_include() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "a.launch",
        r#"<launch><param name="a" value="1"/><include file="$(find demo)/b.launch"/></launch>"#,
    );
    write(
        dir.path(),
        "b.launch",
        r#"<launch><include file="$(find demo)/a.launch"/></launch>"#,
    );

    let err = extract_parameters(&dir.path().join("a.launch"), &demo_resolver(&dir)).unwrap_err();
    match err {
        ExtractError::CyclicInclude { chain } => {
            let names: Vec<_> = chain
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect();
            assert_eq!(names, vec!["a.launch", "b.launch", "a.launch"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_self_include() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "loop.launch",
        r#"<launch><include file="$(find demo)/loop.launch"/></launch>"#,
    );

    let err = extract_nodes(&dir.path().join("loop.launch"), &demo_resolver(&dir)).unwrap_err();
    assert!(matches!(err, ExtractError::CyclicInclude { ref chain } if chain.len() == 2));
    assert!(err.to_string().contains("Circular include"));
}

#[test]
fn test_cycle_detected_in_parallel_mode() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.launch",
        r#"<launch>
            <include file="$(find demo)/ok.launch"/>
            <include file="$(find demo)/root.launch"/>
        </launch>"#,
    );
    write(dir.path(), "ok.launch", "<launch/>");

    let options = ExtractOptions {
        parallel_includes: true,
        ..ExtractOptions::default()
    };
    let root = dir.path().join("root.launch");
    let err = extract_inventory(&root, &demo_resolver(&dir), &options).unwrap_err();
    assert!(matches!(err, ExtractError::CyclicInclude { .. }));
}

#[test]
fn test_depth_limit() {
    let dir = TempDir::new().unwrap();
    for i in 0..5 {
        write(
            dir.path(),
            &format!("level_{i}.launch"),
            &format!(
                r#"<launch><include file="$(find demo)/level_{}.launch"/></launch>"#,
                i + 1
            ),
        );
    }
    write(dir.path(), "level_5.launch", "<launch/>");

    let root = dir.path().join("level_0.launch");
    let resolver = demo_resolver(&dir);

    let within = ExtractOptions {
        max_depth: 5,
        ..ExtractOptions::default()
    };
    assert!(extract_inventory(&root, &resolver, &within).is_ok());

    let too_shallow = ExtractOptions {
        max_depth: 4,
        ..ExtractOptions::default()
    };
    let err = extract_inventory(&root, &resolver, &too_shallow).unwrap_err();
    match err {
        ExtractError::DepthExceeded { file, limit } => {
            assert_eq!(limit, 4);
            assert!(file.ends_with("level_5.launch"), "{}", file.display());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_zero_timeout_budget() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.launch",
        r#"<launch><include file="$(find demo)/child.launch"/></launch>"#,
    );
    write(dir.path(), "child.launch", "<launch/>");

    let options = ExtractOptions {
        timeout: Some(Duration::ZERO),
        ..ExtractOptions::default()
    };
    let root = dir.path().join("root.launch");
    let result = extract_inventory(&root, &demo_resolver(&dir), &options);
    assert!(matches!(result, Err(ExtractError::Timeout { .. })));
}

#[test]
fn test_non_launch_root_element() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "root.xml",
        r#"<config><param name="a" value="1"/><node pkg="p" name="n"/></config>"#,
    );

    let inventory = extract_inventory(
        &dir.path().join("root.xml"),
        &demo_resolver(&dir),
        &ExtractOptions::default(),
    )
    .unwrap();
    assert_eq!(inventory.parameters.len(), 1);
    assert_eq!(inventory.nodes.len(), 1);
}

#[test]
fn test_rewrite_with_same_mtime_is_reread() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root.launch");
    let resolver = PathResolver::new(StaticLocator::new());

    fs::write(&root, r#"<launch><node pkg="a" name="first" type="t"/></launch>"#).unwrap();
    let nodes = extract_nodes(&root, &resolver).unwrap();
    assert_eq!(nodes[0].name, "first");

    let mtime = fs::metadata(&root).unwrap().modified().unwrap();
    fs::write(&root, r#"<launch><node pkg="a" name="second" type="t"/></launch>"#).unwrap();
    fs::File::options()
        .write(true)
        .open(&root)
        .unwrap()
        .set_modified(mtime)
        .unwrap();

    let nodes = extract_nodes(&root, &resolver).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "second");
}
