//! Expanding a hostlist expression and collapsing it back.

fn main() {
    let hosts = hostlist::expand_hostlist("node[01-04,06],login1").unwrap();
    assert_eq!(
        hosts,
        vec!["node01", "node02", "node03", "node04", "node06", "login1"]
    );

    println!("Hosts: {hosts:?}");

    let sorted = hostlist::numerically_sorted(hosts);
    println!("Sorted: {sorted:?}");
    println!(
        "As hostlist: {}",
        hostlist::collapse_hostlist(&sorted, None).unwrap()
    );
}
