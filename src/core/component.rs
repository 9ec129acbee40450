// vespa-logfmt - core/component.rs
//
// Classification of component names as internal (Vespa's own code) or
// external (application code running inside a container).
// Core layer: pure logic, no I/O.

/// First-party packages directly below `com.yahoo`. Sorted for binary search.
///
/// Entries are matched exactly and carry no trailing whitespace, so
/// `search`, `jdisc`, `vespa` and the like classify as internal.
const INTERNAL_COM_YAHOO: &[&str] = &[
    "application",
    "binaryprefix",
    "clientmetrics",
    "collections",
    "component",
    "compress",
    "concurrent",
    "config",
    "configtest",
    "container",
    "data",
    "docproc",
    "docprocs",
    "document",
    "documentapi",
    "documentmodel",
    "dummyreceiver",
    "errorhandling",
    "exception",
    "feedapi",
    "feedhandler",
    "filedistribution",
    "fs4",
    "fsa",
    "geo",
    "io",
    "javacc",
    "jdisc",
    "jrt",
    "lang",
    "language",
    "log",
    "logserver",
    "messagebus",
    "metrics",
    "net",
    "osgi",
    "path",
    "plugin",
    "prelude",
    "processing",
    "protect",
    "reflection",
    "restapi",
    "search",
    "searchdefinition",
    "searchlib",
    "security",
    "slime",
    "socket",
    "statistics",
    "stream",
    "system",
    "tensor",
    "test",
    "text",
    "time",
    "transaction",
    "vdslib",
    "vespa",
    "vespaclient",
    "vespafeeder",
    "vespaget",
    "vespastat",
    "vespasummarybenchmark",
    "vespavisit",
    "vespaxmlparser",
    "yolean",
];

/// Root segment of components logged from inside a Java container.
const CONTAINER_ROOT: &str = "Container";

/// True when `name` is a known first-party package below `com.yahoo`.
pub fn is_internal_package(name: &str) -> bool {
    INTERNAL_COM_YAHOO.binary_search(&name).is_ok()
}

/// Returns true when `component` belongs to Vespa itself.
///
/// Only components under the `Container` root can be external: those are
/// internal when they live in `ai.vespa` or in a known `com.yahoo` package.
/// Everything outside `Container` is logged by Vespa's own processes.
pub fn is_internal(component: &str) -> bool {
    let segments: Vec<&str> = component.split('.').collect();
    if segments[0] != CONTAINER_ROOT {
        return true;
    }
    match segments.as_slice() {
        [_, "ai", "vespa", ..] => true,
        [_, "com", "yahoo", package, ..] => is_internal_package(package),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlist_is_sorted_and_unique() {
        assert!(INTERNAL_COM_YAHOO.windows(2).all(|w| w[0] < w[1]));
        assert!(INTERNAL_COM_YAHOO.iter().all(|name| name.trim() == *name));
    }

    #[test]
    fn test_allowlist_names_match_without_padding() {
        assert!(is_internal("Container.com.yahoo.jdisc.http.HttpServer"));
        assert!(is_internal("Container.com.yahoo.vespa.config.Foo"));
        assert!(!is_internal("Container.com.yahoo.search .Foo"));
    }

    #[test]
    fn test_non_container_roots_are_internal() {
        assert!(is_internal("NotContainer.x"));
        assert!(is_internal("searchnode.proton.server"));
        assert!(is_internal(""));
        assert!(is_internal("container"));
    }

    #[test]
    fn test_short_container_names_are_external() {
        assert!(!is_internal("Container"));
        assert!(!is_internal("Container.ai"));
        assert!(!is_internal("Container.com.yahoo"));
    }

    #[test]
    fn test_ai_vespa_is_internal() {
        assert!(is_internal("Container.ai.vespa"));
        assert!(is_internal("Container.ai.vespa.metricsproxy.Foo"));
        assert!(!is_internal("Container.ai.other.Foo"));
    }

    #[test]
    fn test_com_yahoo_uses_allowlist() {
        assert!(is_internal("Container.com.yahoo.config.Foo"));
        assert!(is_internal("Container.com.yahoo.search.Searcher"));
        assert!(!is_internal("Container.com.yahoo.unknownpkg.Foo"));
    }

    #[test]
    fn test_other_packages_are_external() {
        assert!(!is_internal("Container.com.other.Foo"));
        assert!(!is_internal("Container.org.example.MyHandler"));
    }
}
