/*
Parameter Automation
====================

Control code never touches a parameter directly. It posts "be this value
at time t" events, and the render side asks "what is the value at time t"
once per frame. This keeps envelope timing sample-accurate no matter when
the control thread happened to run.

  value
    v2 ┤              ┌──────────
    v1 ┤     ┌────────┘
  base ┼─────┘
       └─────┴────────┴──────────→ time
            t1       t2

Rules
-----

  set(v, t)      insert an event; events stay sorted by time, and an event
                 at an already-used time goes after the existing ones so the
                 latest call wins.

  cancel(t)      remove every event with time >= t. Events before t and the
                 base value are untouched.

  value_at(t)    value of the last event with time <= t, else the base.

  compact(now)   fold events at or before `now` into the base. Rendering
                 calls this every block so the event list stays short.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationEvent {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutomationParam {
    base: f64,
    events: Vec<AutomationEvent>,
}

impl AutomationParam {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            events: Vec::new(),
        }
    }

    pub fn set_value_at_time(&mut self, value: f64, time: f64) {
        let index = self.events.partition_point(|e| e.time <= time);
        self.events.insert(index, AutomationEvent { time, value });
    }

    pub fn cancel_from(&mut self, time: f64) {
        let keep = self.events.partition_point(|e| e.time < time);
        self.events.truncate(keep);
    }

    pub fn value_at(&self, time: f64) -> f64 {
        self.events
            .iter()
            .rev()
            .find(|e| e.time <= time)
            .map_or(self.base, |e| e.value)
    }

    pub fn compact(&mut self, now: f64) {
        let elapsed = self.events.partition_point(|e| e.time <= now);
        if elapsed > 0 {
            self.base = self.events[elapsed - 1].value;
            self.events.drain(..elapsed);
        }
    }

    /// Pending and not yet compacted events, in time order.
    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    /// Last scheduled value, or the base when nothing is pending.
    pub fn final_value(&self) -> f64 {
        self.events.last().map_or(self.base, |e| e.value)
    }
}
