use meshweld::{
    io::{self, obj, stl, StlEncoding},
    prelude::*,
};
use std::path::Path;

// Binary STL of a unit cube: 12 triangles, 8 corners.
fn cube_stl(path: &Path) {
    let corners = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let faces: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];

    let mut bytes = vec![0u8; 80];
    bytes.extend(12u32.to_le_bytes());
    for face in faces {
        bytes.extend([0u8; 12]);
        for corner in face {
            for coordinate in corners[corner] {
                bytes.extend((coordinate as f32).to_le_bytes());
            }
        }
        bytes.extend([0u8; 2]);
    }

    std::fs::write(path, bytes).unwrap();
}

#[test]
fn stl_to_obj_to_stl() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cube.stl");
    let middle = dir.path().join("cube.obj");
    let output = dir.path().join("cube_back.stl");
    cube_stl(&input);

    let welded = io::load(&input, &WeldOptions::default()).unwrap();
    assert_eq!(welded.vertex_count(), 8);
    assert_eq!(welded.face_count(), 12);
    assert_eq!(welded.faces[0], [0, 1, 2]);

    io::save(&welded, &middle, StlEncoding::default()).unwrap();
    let text = std::fs::read_to_string(&middle).unwrap();
    assert!(text.contains("o cube\n"));
    assert_eq!(text.lines().filter(|line| line.starts_with("v ")).count(), 8);
    assert_eq!(text.lines().filter(|line| line.starts_with("f ")).count(), 12);

    let indexed = io::load(&middle, &WeldOptions::default()).unwrap();
    assert_eq!(indexed, welded);

    io::save(&indexed, &output, StlEncoding::Binary).unwrap();
    assert_eq!(std::fs::metadata(&output).unwrap().len(), 84 + 12 * 50);
    assert_eq!(io::load(&output, &WeldOptions::default()).unwrap(), welded);
}

#[test]
fn unmerged_soup() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cube.stl");
    cube_stl(&input);

    let soup = stl::load_stl(&input, &WeldOptions::UNMERGED).unwrap();
    assert_eq!(soup.vertex_count(), 36);

    // Welding the triangles of the soup again gives the welded cube.
    let mut welder = Welder::new(WeldOptions::default());
    for triangle in soup.triangles() {
        welder.push_triangle(triangle);
    }
    assert_eq!(welder.finish(), stl::load_stl(&input, &WeldOptions::default()).unwrap());
}

#[test]
fn ascii_stl() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cube.stl");
    let ascii = dir.path().join("ascii.stl");
    cube_stl(&input);

    let mesh = io::load(&input, &WeldOptions::default()).unwrap();
    io::save(&mesh, &ascii, StlEncoding::Ascii).unwrap();

    let text = std::fs::read_to_string(&ascii).unwrap();
    assert!(text.starts_with("solid ascii\n"));
    assert!(text.ends_with("endsolid ascii\n"));
    assert_eq!(io::load(&ascii, &WeldOptions::default()).unwrap(), mesh);
}

#[test]
fn obj_polygons_to_stl() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("square.obj");
    let output = dir.path().join("square.stl");
    std::fs::write(&input, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

    let mesh = obj::load_obj(&input).unwrap();
    assert_eq!(mesh.faces, [[0, 1, 2], [0, 2, 3]]);

    stl::save_stl(&mesh, &output, StlEncoding::Binary).unwrap();
    let back = stl::load_stl(&output, &WeldOptions::default()).unwrap();
    assert_eq!(back, mesh);
}

#[test]
fn errors_name_their_cause() {
    let dir = tempfile::tempdir().unwrap();
    let truncated = dir.path().join("truncated.stl");
    cube_stl(&truncated);
    let bytes = std::fs::read(&truncated).unwrap();
    std::fs::write(&truncated, &bytes[..bytes.len() - 50]).unwrap();

    let error = io::load(&truncated, &WeldOptions::default()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "truncated STL: header declares 12 triangles, stream holds 11"
    );

    let error = io::load(dir.path().join("missing.obj"), &WeldOptions::default()).unwrap_err();
    assert!(matches!(error, IoError::FileNotFound { .. }));
}
