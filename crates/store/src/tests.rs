use super::*;

fn rule(key: &str) -> StyleRule {
	StyleRule::new(key, format!(".{key}{{color:red}}"), 3000)
}

fn keys(store: &RuleStore) -> Vec<&str> {
	let mut keys: Vec<_> = store.snapshot().into_iter().map(|r| r.key.as_str()).collect();
	keys.sort_unstable();
	keys
}

#[test]
fn first_ingest_with_rules_invalidates() {
	let mut store = RuleStore::new();
	assert_eq!(store.ingest("a.js", vec![rule("x1")]), Invalidation::KeysChanged);
}

#[test]
fn first_ingest_without_rules_is_unchanged() {
	let mut store = RuleStore::new();
	assert_eq!(store.ingest("a.js", Vec::new()), Invalidation::Unchanged);
	assert!(store.contains("a.js"));
}

#[test]
fn added_key_invalidates() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1")]);
	assert!(store.ingest("a.js", vec![rule("x1"), rule("x2")]).is_required());
}

#[test]
fn removed_key_invalidates() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1"), rule("x2")]);
	assert!(store.ingest("a.js", vec![rule("x2")]).is_required());
}

#[test]
fn swapped_key_invalidates() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1")]);
	assert_eq!(store.ingest("a.js", vec![rule("x3")]), Invalidation::KeysChanged);
}

#[test]
fn reordered_rules_do_not_invalidate() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1"), rule("x2")]);
	let signal = store.ingest("a.js", vec![rule("x2"), rule("x1")]);
	assert_eq!(signal, Invalidation::Unchanged);
	assert!(!bool::from(signal));
}

#[test]
fn changed_text_with_same_keys_replaces_without_invalidating() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1")]);
	let signal = store.ingest("a.js", vec![StyleRule::new("x1", ".x1{color:blue}", 3000)]);
	assert!(!signal.is_required());
	assert_eq!(store.rules("a.js").unwrap()[0].ltr(), ".x1{color:blue}");
}

#[test]
fn always_recompute_pattern_forces_invalidation() {
	let mut store = RuleStore::with_always_recompute(Regex::new(r"\.stylex\.[jt]sx?$").unwrap());
	let _ = store.ingest("tokens.stylex.ts", vec![rule("x1")]);
	assert_eq!(store.ingest("tokens.stylex.ts", vec![rule("x1")]), Invalidation::AlwaysRecompute);
	let _ = store.ingest("a.js", vec![rule("x1")]);
	assert_eq!(store.ingest("a.js", vec![rule("x1")]), Invalidation::Unchanged);
}

#[test]
fn keys_changed_wins_over_always_recompute() {
	let mut store = RuleStore::with_always_recompute(Regex::new(r"\.stylex\.js$").unwrap());
	assert_eq!(store.ingest("vars.stylex.js", vec![rule("x1")]), Invalidation::KeysChanged);
}

#[test]
fn every_module_active_before_first_graph() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1")]);
	let _ = store.ingest("b.js", vec![rule("x2")]);
	assert_eq!(keys(&store), vec!["x1", "x2"]);
}

#[test]
fn inactive_modules_are_excluded() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1")]);
	let _ = store.ingest("b.js", vec![rule("x2")]);
	store.set_active_modules(["a.js"]);
	assert_eq!(keys(&store), vec!["x1"]);
	assert!(!store.is_active("b.js"));
	assert!(store.contains("b.js"));

	store.set_active_modules(vec![String::from("a.js"), String::from("b.js")]);
	assert_eq!(keys(&store), vec!["x1", "x2"]);
}

#[test]
fn replacing_a_module_drops_its_old_rules() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1"), rule("x2")]);
	let _ = store.ingest("a.js", vec![rule("x3")]);
	assert_eq!(keys(&store), vec!["x3"]);
}

#[test]
fn snapshot_is_stable_across_calls() {
	let mut store = RuleStore::new();
	for (module, key) in [("c.js", "x3"), ("a.js", "x1"), ("b.js", "x2")] {
		let _ = store.ingest(module, vec![rule(key)]);
	}
	let first: Vec<_> = store.snapshot().into_iter().map(|r| r.key.clone()).collect();
	assert_eq!(first, vec!["x1", "x2", "x3"]);
	assert_eq!(store.snapshot().len(), 3);
}

#[test]
fn remove_and_clear() {
	let mut store = RuleStore::new();
	let _ = store.ingest("a.js", vec![rule("x1")]);
	let _ = store.ingest("b.js", vec![rule("x2")]);
	store.set_active_modules(["a.js"]);

	assert_eq!(store.remove("a.js").map(|rules| rules.len()), Some(1));
	assert!(store.snapshot().is_empty());
	assert_eq!(store.len(), 1);

	store.clear();
	assert!(store.is_empty());
	let _ = store.ingest("b.js", vec![rule("x2")]);
	assert!(store.is_active("b.js"));
}
