//! Column guide-line application.

use xi_tweaks_config::Config;

use crate::host::HostShell;

/// Re-issue the configured guide lines on the editing surface.
///
/// Runs whenever a document becomes active, since each document carries its
/// own marker state in the host. Markers are cleared first either way, so
/// disabling the feature also wipes lines left over from a previous pass.
pub fn apply_column_markers(shell: &dyn HostShell, config: &Config) {
    shell.clear_column_markers();
    if !config.column_marker_enabled {
        return;
    }
    let markers = config.column_markers();
    log::debug!("applying {} column markers", markers.len());
    shell.set_column_markers(&markers);
}
