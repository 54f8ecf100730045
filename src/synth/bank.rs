use crate::{
    config::SynthConfig,
    engine::{Clock, SynthContext},
    error::{Error, Result},
    graph::SignalGraph,
    synth::{
        message::MessageReceiver,
        port::Port,
        voice::VelocityGain,
    },
};

/// Build `config.port_count` ports wired to the graph's destination.
///
/// Ids are the zero-padded index (`"00"`, `"01"`, ...), names are
/// `"{prefix} {id}"`.
pub fn create_ports<G: SignalGraph>(graph: &mut G, config: &SynthConfig) -> Result<Vec<Port>> {
    config.validate()?;
    let destination = graph.destination().ok_or(Error::NoDestination)?;
    let gain_law = VelocityGain::new(config.voice_peak_gain, config.velocity_response);

    let ports = (0..config.port_count)
        .map(|index| {
            let id = format!("{index:02}");
            let name = format!("{} {id}", config.name_prefix);
            Port::new(graph, destination, id, name, config.port_gain, gain_law)
        })
        .collect();

    Ok(ports)
}

/// A fixed set of ports sharing one signal graph and clock.
pub struct PortBank<G, C> {
    ctx: SynthContext<G, C>,
    ports: Vec<Port>,
}

impl<G: SignalGraph, C: Clock> PortBank<G, C> {
    pub fn new(mut graph: G, clock: C, config: &SynthConfig) -> Result<Self> {
        let ports = create_ports(&mut graph, config)?;

        tracing::info!(
            ports = ports.len(),
            voice_peak_gain = config.voice_peak_gain,
            port_gain = config.port_gain,
            velocity_response = ?config.velocity_response,
            "port bank ready"
        );

        Ok(Self {
            ctx: SynthContext::new(graph, clock),
            ports,
        })
    }

    /// Sixteen ports with the default gains.
    pub fn with_defaults(graph: G, clock: C) -> Result<Self> {
        Self::new(graph, clock, &SynthConfig::default())
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, index: usize) -> Option<&Port> {
        self.ports.get(index)
    }

    /// Index of the port with the given id.
    pub fn find(&self, id: &str) -> Option<usize> {
        self.ports.iter().position(|port| port.id() == id)
    }

    /// Deliver raw message bytes to one port.
    ///
    /// Only an out-of-range port index is an error; the message itself is
    /// never rejected.
    pub fn send(&mut self, index: usize, message: &[u8], at_ms: Option<f64>) -> Result<()> {
        let port = self.ports.get_mut(index).ok_or(Error::UnknownPort(index))?;
        port.send(&mut self.ctx, message, at_ms);
        Ok(())
    }

    /// Dispatch every pending event from `rx` in delivery order. Returns the
    /// number of events handled.
    pub fn drain<R: MessageReceiver>(&mut self, rx: &mut R) -> usize {
        let mut handled = 0;
        while let Some(event) = rx.pop() {
            match self.ports.get_mut(event.port) {
                Some(port) => {
                    port.send(&mut self.ctx, event.bytes(), event.at);
                    handled += 1;
                }
                None => tracing::warn!(port = event.port, "event for unknown port dropped"),
            }
        }
        handled
    }

    pub fn context(&self) -> &SynthContext<G, C> {
        &self.ctx
    }

    pub fn graph(&self) -> &G {
        &self.ctx.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.ctx.graph
    }

    pub fn clock(&self) -> &C {
        &self.ctx.clock
    }
}
