use invkeep_core::{ItemStack, SimTick};
use invkeep_inventory::{InventoryEvent, PlayerInventory};
use invkeep_testkit::{EventRecord, JsonlSink};

#[test]
fn deterministic_event_stream_can_be_written() {
    let path = std::env::temp_dir().join(format!("invkeep-smoke-{}.jsonl", std::process::id()));
    let mut sink = JsonlSink::create(&path).expect("can create temp log");

    let mut inv = PlayerInventory::new(Vec::<InventoryEvent>::new());
    inv.grant(ItemStack::new(1, 1), true);
    let tick = SimTick::ZERO.advance(1);
    for event in inv.sink() {
        sink.write(&EventRecord::new(tick, event)).expect("can write event");
    }
    sink.flush().expect("flush");

    let contents = std::fs::read_to_string(&path).expect("log readable");
    let record: serde_json::Value =
        serde_json::from_str(contents.lines().next().expect("one line")).expect("valid json");
    assert_eq!(record["tick"], 1);
    assert_eq!(record["kind"], "slot_changed");
    assert_eq!(record["payload"]["slot"], 9);
    let _ = std::fs::remove_file(&path);
}
