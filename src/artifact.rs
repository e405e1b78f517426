//! Relevance filtering and download URL derivation
//!
//! Pure functions of the parsed notification and the startup configuration;
//! no state is carried between requests.

use crate::payload::{Component, Notification};

/// Decides whether a notification concerns an artifact type the operator
/// cares about: the segment after the last `-` in the component name is
/// membership-tested against the configured suffixes. A name without a
/// hyphen is tested whole; that matches how the repository names things
/// and is intentional.
pub fn is_relevant(component: &Component, suffixes: &[String]) -> bool {
    let suffix = component
        .name
        .rsplit('-')
        .next()
        .unwrap_or(&component.name);
    suffixes.iter().any(|s| s == suffix)
}

/// Builds the asset filename for a component. Portlets are packaged as
/// web archives, everything else as plain jars.
pub fn build_asset(name: &str, version: &str) -> String {
    let extension = if name.contains("portlet") {
        ".war"
    } else {
        ".jar"
    };
    format!("{}-{}{}", name, version, extension)
}

/// Derives the repository download URL for an updated component.
///
/// Snapshot repositories serve assets under a `<base>-SNAPSHOT` version
/// directory while the asset filename keeps the full timestamped version.
/// The asymmetry mirrors the repository's own layout.
pub fn build_url(notification: &Notification, component: &Component, base_repo: &str) -> String {
    let repo = &notification.repository_name;
    let group = component.group.replace('.', "/");
    let asset = build_asset(&component.name, &component.version);

    let version = if repo.contains("snapshot") {
        let raw = component
            .version
            .split('-')
            .next()
            .unwrap_or(&component.version);
        format!("{}-SNAPSHOT", raw)
    } else {
        component.version.clone()
    };

    format!(
        "{}/repository/{}/{}/{}/{}/{}",
        base_repo, repo, group, component.name, version, asset
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, group: &str, version: &str) -> Component {
        Component {
            name: name.to_string(),
            group: group.to_string(),
            version: version.to_string(),
        }
    }

    fn notification(repo: &str) -> Notification {
        Notification {
            repository_name: repo.to_string(),
            component: String::new(),
        }
    }

    #[test]
    fn portlet_suffix_is_relevant() {
        let suffixes = vec!["portlet".to_string()];
        let c = component("vaccine-designer-portlet", "life.qbic", "1.0.0");
        assert!(is_relevant(&c, &suffixes));
    }

    #[test]
    fn other_suffix_is_not_relevant() {
        let suffixes = vec!["portlet".to_string()];
        let c = component("vaccine-designer-service", "life.qbic", "1.0.0");
        assert!(!is_relevant(&c, &suffixes));
    }

    #[test]
    fn name_without_hyphen_is_tested_whole() {
        let suffixes = vec!["portlet".to_string()];
        assert!(is_relevant(
            &component("portlet", "life.qbic", "1.0.0"),
            &suffixes
        ));
        assert!(!is_relevant(
            &component("service", "life.qbic", "1.0.0"),
            &suffixes
        ));
    }

    #[test]
    fn portlet_asset_is_a_war() {
        assert_eq!(
            build_asset("foo-portlet", "1.0.0"),
            "foo-portlet-1.0.0.war"
        );
    }

    #[test]
    fn non_portlet_asset_is_a_jar() {
        assert_eq!(
            build_asset("foo-service", "1.0.0"),
            "foo-service-1.0.0.jar"
        );
    }

    #[test]
    fn portlet_substring_anywhere_means_war() {
        assert_eq!(
            build_asset("portlethelper", "2.1.0"),
            "portlethelper-2.1.0.war"
        );
    }

    #[test]
    fn release_url_uses_version_as_is() {
        let n = notification("maven-releases");
        let c = component("vaccine-designer-portlet", "life.qbic", "1.0.0");
        assert_eq!(
            build_url(&n, &c, "https://nexus.example.org"),
            "https://nexus.example.org/repository/maven-releases/life/qbic/vaccine-designer-portlet/1.0.0/vaccine-designer-portlet-1.0.0.war"
        );
    }

    #[test]
    fn snapshot_url_rewrites_version_but_not_asset() {
        let n = notification("maven-snapshots");
        let c = component(
            "vaccine-designer-portlet",
            "life.qbic",
            "1.0.0-20180802.133341-3",
        );
        let url = build_url(&n, &c, "https://nexus.example.org");
        assert_eq!(
            url,
            "https://nexus.example.org/repository/maven-snapshots/life/qbic/vaccine-designer-portlet/1.0.0-SNAPSHOT/vaccine-designer-portlet-1.0.0-20180802.133341-3.war"
        );
    }

    #[test]
    fn group_dots_become_path_segments() {
        let n = notification("maven-releases");
        let c = component("tool-service", "life.qbic.portlet", "0.3.1");
        let url = build_url(&n, &c, "https://nexus.example.org");
        assert!(url.contains("/life/qbic/portlet/tool-service/"));
    }
}
