//! Pairing the nodes of a SLURM allocation with their task counts.

fn main() {
    let nodes = hostlist::numerically_sorted(hostlist::expand_hostlist("cn[9-12]").unwrap());
    let tasks = hostlist::parse_slurm_tasks_per_node("8(x3),4").unwrap();

    for (node, count) in hostlist::zip_slurm_tasks(&nodes, &tasks).unwrap() {
        println!("{node}: {count} tasks");
    }
}
