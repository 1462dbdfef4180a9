// {{ Copyright }}
// Author: {{ Author }}

fn main() {
    println!("Hello from {{ ProjectName }}!");
}
