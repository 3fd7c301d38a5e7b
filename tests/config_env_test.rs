//! Environment layer of Settings loading
//!
//! Kept in its own test binary: it sets process-wide MAPLINE_* variables.

use tempfile::TempDir;

use mapline::config::Settings;
use mapline::domain::{ExportFormat, NodeShape};

#[test]
fn given_env_vars_and_local_file_when_loading_then_env_wins() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("mapline.toml");
    std::fs::write(
        &local,
        "[style]\nedge_font_size = 12\nnode_shape = \"circle\"\n",
    )
    .unwrap();
    std::env::set_var("MAPLINE_STYLE__EDGE_FONT_SIZE", "22");
    std::env::set_var("MAPLINE_RENDERER__FORMATS", "svg,pdf");

    // Act
    let result = Settings::load_from(None, Some(&local));
    std::env::remove_var("MAPLINE_STYLE__EDGE_FONT_SIZE");
    std::env::remove_var("MAPLINE_RENDERER__FORMATS");
    let settings = result.unwrap();

    // Assert
    assert_eq!(settings.style.edge_font_size, 22);
    assert_eq!(settings.style.node_shape, NodeShape::Circle);
    assert_eq!(
        settings.renderer.formats,
        vec![ExportFormat::Svg, ExportFormat::Pdf]
    );
}
