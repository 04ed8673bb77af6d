/*!
# Pipeline

Drives a single run from an input [`Source`] to an image file:

1. **load** the graph with the reader of its [`InputFormat`] or a seeded generator,
2. **prepare** it for the [`App`]: symmetrize for `color`, pair reverse edges for `flow`,
3. optionally **export** the loaded graph as Dimacs / edge-list text,
4. **compile** it into a [`CsrGraph`] and compute the [`Reference`] result,
5. **serialize** the matching [`MemoryImage`] and write it atomically.

A [`Pipeline`] only holds configuration; every run owns its [`Context`], so nothing is shared
between runs.

```no_run
use graph_gen::pipeline::*;

let source = Source::from_args(App::Sssp, Mode::Grid, &["64".to_string()]).unwrap();
let summary = Pipeline::new(App::Sssp).out_dir("/tmp").run(&source).unwrap();
println!("{} ({})", summary.path.display(), summary.digest);
```
*/

use std::{
    fmt::{self, Display},
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use tracing::{debug, info};

use crate::{algo::*, error::*, gens::*, image::*, io::*, prelude::*};

/// Accelerator application an image is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum App {
    /// Single-source shortest paths
    Sssp,
    /// Graph coloring
    Color,
    /// Maximum flow (push-relabel)
    Flow,
}

impl App {
    /// File extension of images of this app
    pub fn extension(&self) -> &'static str {
        match self {
            App::Sssp => "sssp",
            App::Color => "color",
            App::Flow => "flow",
        }
    }
}

impl Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the graph of a run is obtained, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Binary latitude/longitude graph
    Latlon,
    /// Generated grid
    Grid,
    /// Weighted Dimacs-style text
    Gr,
    /// Plain edge list
    Color,
}

impl Mode {
    /// Format of the input file, `None` for generated graphs
    pub fn input_format(self) -> Option<InputFormat> {
        match self {
            Mode::Latlon => Some(InputFormat::LatLon(LatLonReader::default())),
            Mode::Grid => None,
            Mode::Gr => Some(InputFormat::Dimacs(DimacsReader::default())),
            Mode::Color => Some(InputFormat::EdgeList(EdgeListReader::default())),
        }
    }
}

/// Where the graph of a run comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Graph file in the given format
    File { path: PathBuf, format: InputFormat },
    /// Square grid of `size x size` vertices
    Grid { size: NumNodes },
    /// Layered flow network
    FlowGrid {
        rows: NumNodes,
        cols: NumNodes,
        connections: NumNodes,
    },
}

impl Source {
    /// Interprets the command line `mode` and its arguments.
    ///
    /// `grid` takes a single size for `sssp`/`color` and `rows cols connections` for `flow`;
    /// every other mode names an [`InputFormat`] and takes a path.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] for missing or surplus arguments and arguments that
    /// are not numbers.
    pub fn from_args(app: App, mode: Mode, args: &[String]) -> Result<Self> {
        let Some(format) = mode.input_format() else {
            return match (app, args) {
                (App::Flow, [rows, cols, connections]) => Ok(Source::FlowGrid {
                    rows: parse_argument(rows, "rows")?,
                    cols: parse_argument(cols, "cols")?,
                    connections: parse_argument(connections, "connections")?,
                }),
                (App::Flow, _) => Err(Error::InvalidParameter(
                    "flow grid expects <rows> <cols> <connections>".into(),
                )),
                (_, [size]) => Ok(Source::Grid {
                    size: parse_argument(size, "size")?,
                }),
                (_, _) => Err(Error::InvalidParameter("grid expects <size>".into())),
            };
        };

        match args {
            [path] => Ok(Source::File {
                path: PathBuf::from(path),
                format,
            }),
            _ => Err(Error::InvalidParameter(format!("{mode:?} expects <path>"))),
        }
    }

    /// Output file name without extension: the input's basename or `grid_<r>x<c>`
    pub fn stem(&self) -> String {
        match self {
            Source::File { path, .. } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            Source::Grid { size } => format!("grid_{size}x{size}"),
            Source::FlowGrid { rows, cols, .. } => format!("grid_{rows}x{cols}"),
        }
    }

    /// Returns *true* if graphs from this source come with a flow source and sink
    /// (and with paired reverse edges when read for `flow`)
    pub fn declares_terminals(&self) -> bool {
        matches!(
            self,
            Source::FlowGrid { .. }
                | Source::File {
                    format: InputFormat::Dimacs(_),
                    ..
                }
        )
    }
}

fn parse_argument(value: &str, name: &str) -> Result<NumNodes> {
    value
        .parse()
        .map_err(|_| Error::InvalidParameter(format!("{name} must be a number, got {value:?}")))
}

/// Reference result computed in software
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// Distances live in the [`CsrGraph`]; the statistics of the run
    Distances(SsspStats),
    /// One color per vertex
    Colors(Vec<u32>),
    Flow(FlowMetadata),
}

/// Everything one run produces before serialization
#[derive(Debug, Clone)]
pub struct Context {
    pub graph: Graph,
    pub csr: CsrGraph,
    pub reference: Reference,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    /// Length of the image in words
    pub words: usize,
    /// SHA-256 of the written file
    pub digest: String,
}

/// Configuration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    app: App,
    out_dir: PathBuf,
    seed: Option<u64>,
    start: Option<Node>,
    sink: Option<Node>,
    vertices: Option<NumNodes>,
    log_relabel_interval: u32,
    export_dimacs: bool,
    export_edges: bool,
}

impl Pipeline {
    /// Creates a pipeline for `app` writing into the current directory
    pub fn new(app: App) -> Self {
        Self {
            app,
            out_dir: PathBuf::from("."),
            seed: None,
            start: None,
            sink: None,
            vertices: None,
            log_relabel_interval: DEFAULT_LOG_RELABEL_INTERVAL,
            export_dimacs: false,
            export_edges: false,
        }
    }

    pub fn app(&self) -> App {
        self.app
    }

    /// Updates the output directory
    pub fn out_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Overrides the seed of the generators
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the start vertex of `sssp` and the source of `flow`
    pub fn start(mut self, start: Option<Node>) -> Self {
        self.start = start;
        self
    }

    /// Overrides the sink of `flow`
    pub fn sink(mut self, sink: Option<Node>) -> Self {
        self.sink = sink;
        self
    }

    /// Overrides the number of vertices preallocated by the edge-list reader
    pub fn vertices(mut self, n: Option<NumNodes>) -> Self {
        self.vertices = n;
        self
    }

    pub fn log_relabel_interval(mut self, log: u32) -> Self {
        self.log_relabel_interval = log;
        self
    }

    /// Also writes the loaded graph as `<stem>.dimacs`
    pub fn export_dimacs(mut self, export: bool) -> Self {
        self.export_dimacs = export;
        self
    }

    /// Also writes the loaded graph as `<stem>.edges`
    pub fn export_edges(mut self, export: bool) -> Self {
        self.export_edges = export;
        self
    }

    /// Path of the image for `source`
    pub fn output_path(&self, source: &Source) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", source.stem(), self.app.extension()))
    }

    /// Runs all stages and writes the image.
    ///
    /// # Errors
    /// Returns the first error of any stage; no image file exists in that case.
    pub fn run(&self, source: &Source) -> Result<RunSummary> {
        if self.app == App::Flow && self.sink.is_none() && !source.declares_terminals() {
            return Err(Error::InvalidParameter(format!(
                "flow on {} needs an explicit sink",
                source.stem()
            )));
        }

        let graph = self.load(source)?;
        self.export(&graph, source)?;

        let context = self.solve(self.prepare(graph, source))?;
        let image = self.serialize(&context)?;

        let path = self.output_path(source);
        write_atomically(&path, |writer| image.write_to(writer))?;

        let digest = image.digest_sha256();
        info!(
            path = %path.display(),
            words = image.len(),
            digest = %digest,
            "image written"
        );

        Ok(RunSummary {
            path,
            words: image.len(),
            digest,
        })
    }

    /// Builds the graph described by `source`.
    ///
    /// # Errors
    /// Propagates reader and generator errors.
    pub fn load(&self, source: &Source) -> Result<Graph> {
        let graph = match source {
            Source::File { path, format } => {
                Graph::try_from_file(path, &self.configure_format(format))?
            }
            Source::Grid { size } => {
                let mut generator = GridGraph::new().size(*size);
                if let Some(seed) = self.seed {
                    generator = generator.seed(seed);
                }
                generator.generate()?
            }
            Source::FlowGrid {
                rows,
                cols,
                connections,
            } => {
                let mut generator = FlowGrid::new()
                    .rows(*rows)
                    .cols(*cols)
                    .connections(*connections);
                if let Some(seed) = self.seed {
                    generator = generator.seed(seed);
                }
                generator.generate()?
            }
        };

        info!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            source = graph.source(),
            sink = graph.sink(),
            "graph loaded"
        );
        Ok(graph)
    }

    /// Applies the app-specific settings to the default reader of `format`
    fn configure_format(&self, format: &InputFormat) -> InputFormat {
        match format {
            InputFormat::Dimacs(reader) => {
                InputFormat::Dimacs(reader.clone().residual(self.app == App::Flow))
            }
            InputFormat::EdgeList(reader) => InputFormat::EdgeList(match self.vertices {
                Some(n) => reader.clone().number_of_nodes(n),
                None => reader.clone(),
            }),
            InputFormat::LatLon(reader) => InputFormat::LatLon(reader.clone()),
        }
    }

    fn export(&self, graph: &Graph, source: &Source) -> Result<()> {
        if self.export_dimacs {
            let path = self.out_dir.join(format!("{}.dimacs", source.stem()));
            write_atomically(&path, |writer| {
                DimacsWriter::new().try_write_graph(graph, writer)
            })?;
            info!(path = %path.display(), "dimacs export written");
        }

        if self.export_edges {
            let path = self.out_dir.join(format!("{}.edges", source.stem()));
            write_atomically(&path, |writer| {
                EdgeListWriter::new().try_write_graph(graph, writer)
            })?;
            info!(path = %path.display(), "edge list export written");
        }

        Ok(())
    }

    /// Turns a graph loaded from `source` into the form the app's image expects.
    ///
    /// `color` works on the symmetric closure. `flow` needs paired reverse edges, which only
    /// the flow generator and the residual Dimacs reader produce; other inputs are converted.
    /// Configured start and sink vertices replace the ones of the input.
    pub fn prepare(&self, mut graph: Graph, source: &Source) -> Graph {
        match self.app {
            App::Sssp => {}
            App::Color => graph.symmetrize(),
            App::Flow => {
                if !source.declares_terminals() {
                    debug!("adding reverse edges for flow");
                    graph = graph.to_residual();
                }
            }
        }

        if let Some(start) = self.start {
            graph.set_source(start);
        }
        if let Some(sink) = self.sink {
            graph.set_sink(sink);
        }
        graph
    }

    /// Compiles `graph` and computes the reference result of the app.
    ///
    /// # Errors
    /// Returns the solver's error, or [`Error::InvalidParameter`] if the start vertex, source
    /// or sink does not fit the graph.
    pub fn solve(&self, graph: Graph) -> Result<Context> {
        let mut csr = graph.to_csr();

        let reference = match self.app {
            App::Sssp => {
                let start = graph.source();
                let stats = ShortestPaths::new(start).run(&mut csr)?;
                info!(
                    start,
                    reached = stats.reached,
                    pops = stats.pops,
                    "shortest paths computed"
                );
                Reference::Distances(stats)
            }
            App::Color => {
                let colors = GreedyColoring::run(&csr)?;
                info!(
                    colors = colors.iter().max().map_or(0, |&c| c + 1),
                    "coloring computed"
                );
                Reference::Colors(colors)
            }
            App::Flow => {
                let (source, sink) = (graph.source(), graph.sink());
                if sink >= graph.number_of_nodes() || sink == source {
                    return Err(Error::InvalidParameter(format!(
                        "flow from {source} to {sink} needs distinct vertices"
                    )));
                }
                let config = FlowConfig::new().log_relabel_interval(self.log_relabel_interval);
                let meta = FlowMetadata::compute(&graph, &config)?;
                info!(
                    source,
                    sink,
                    excess = meta.source_excess,
                    "flow metadata computed"
                );
                Reference::Flow(meta)
            }
        };

        Ok(Context {
            graph,
            csr,
            reference,
        })
    }

    /// Lays out the image of a solved context.
    ///
    /// # Errors
    /// Returns the serializer's [`Error::FieldOverflow`] or [`Error::InvalidParameter`].
    pub fn serialize(&self, context: &Context) -> Result<MemoryImage> {
        let image = match &context.reference {
            Reference::Distances(_) => sssp_image(&context.csr, context.graph.source())?,
            Reference::Colors(colors) => color_image(&context.csr, colors)?,
            Reference::Flow(meta) => flow_image(
                &context.csr,
                context.graph.source(),
                context.graph.sink(),
                meta,
            )?,
        };

        debug!(header = ?image.header(), "image header");
        Ok(image)
    }
}

/// Writes `path` through `<path>.partial`, renaming it only after `write` succeeded
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    let result = create_file(&partial).and_then(|mut writer| {
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    });

    match result {
        Ok(()) => {
            fs::rename(&partial, path)?;
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&partial);
            Err(err)
        }
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn read_image(path: &Path) -> MemoryImage {
        MemoryImage::from_bytes(&fs::read(path).unwrap()).unwrap()
    }

    fn files_in(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn apps_and_modes() {
        assert_eq!(App::from_str("SSSP", true).unwrap(), App::Sssp);
        assert_eq!(App::from_str("flow", false).unwrap().extension(), "flow");
        assert_eq!(App::Color.to_string(), "color");
        assert!(App::from_str("astar", true).is_err());

        assert!(matches!(
            Mode::from_str("gr", false).unwrap().input_format(),
            Some(InputFormat::Dimacs(_))
        ));
        assert!(matches!(
            Mode::from_str("COLOR", true).unwrap().input_format(),
            Some(InputFormat::EdgeList(_))
        ));
        assert!(matches!(
            Mode::Latlon.input_format(),
            Some(InputFormat::LatLon(_))
        ));
        assert_eq!(Mode::Grid.input_format(), None);
        assert!(Mode::from_str("bin", true).is_err());
    }

    #[test]
    fn sources_from_args() {
        assert_eq!(
            Source::from_args(App::Sssp, Mode::Grid, &args(&["8"])).unwrap(),
            Source::Grid { size: 8 }
        );
        assert_eq!(
            Source::from_args(App::Flow, Mode::Grid, &args(&["3", "5", "2"])).unwrap(),
            Source::FlowGrid {
                rows: 3,
                cols: 5,
                connections: 2
            }
        );
        assert!(Source::from_args(App::Flow, Mode::Grid, &args(&["3"])).is_err());
        assert!(Source::from_args(App::Color, Mode::Grid, &args(&["x"])).is_err());
        assert!(Source::from_args(App::Sssp, Mode::Gr, &[]).is_err());

        let source = Source::from_args(App::Sssp, Mode::Latlon, &args(&["maps/usa.bin"])).unwrap();
        assert!(matches!(
            &source,
            Source::File {
                format: InputFormat::LatLon(_),
                ..
            }
        ));
        assert_eq!(source.stem(), "usa.bin");
    }

    #[test]
    fn output_names() {
        let pipeline = Pipeline::new(App::Flow).out_dir("out");
        let source = Source::FlowGrid {
            rows: 4,
            cols: 7,
            connections: 3,
        };
        assert_eq!(
            pipeline.output_path(&source),
            PathBuf::from("out/grid_4x7.flow")
        );

        let pipeline = Pipeline::new(App::Color);
        assert_eq!(
            pipeline.output_path(&Source::Grid { size: 5 }),
            PathBuf::from("./grid_5x5.color")
        );
    }

    #[test]
    fn sssp_grid_run() {
        let dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(App::Sssp).out_dir(dir.path());
        let source = Source::Grid { size: 6 };

        let summary = pipeline.run(&source).unwrap();
        assert_eq!(summary.path, dir.path().join("grid_6x6.sssp"));
        assert_eq!(files_in(&dir), vec!["grid_6x6.sssp".to_string()]);

        let image = read_image(&summary.path);
        assert_eq!(image.len(), summary.words);
        assert_eq!(image.digest_sha256(), summary.digest);
        assert_eq!(image.magic(), Some(IMAGE_MAGIC));
        assert_eq!(image.number_of_nodes(), Some(36));
        assert_eq!(image.number_of_edges(), Some(60));
        assert_eq!(image.end(), Some(image.len() as u32));

        // the start vertex sits at distance 0
        let truth = image.section(image[word::GROUND_TRUTH_BASE], 36);
        assert_eq!(truth[0], 0);
        assert!(truth.iter().all(|&d| d != UNREACHED));

        // same parameters, same image
        let again = pipeline.run(&source).unwrap();
        assert_eq!(again.digest, summary.digest);

        let reseeded = pipeline.clone().seed(Some(7)).run(&source).unwrap();
        assert_ne!(reseeded.digest, summary.digest);
    }

    #[test]
    fn sssp_start_override() {
        let dir = TempDir::new().unwrap();
        let summary = Pipeline::new(App::Sssp)
            .out_dir(dir.path())
            .start(Some(35))
            .run(&Source::Grid { size: 6 })
            .unwrap();

        let image = read_image(&summary.path);
        assert_eq!(image[word::START], 35);
        // edges only point down and right, so only the last vertex is reachable
        let truth = image.section(image[word::GROUND_TRUTH_BASE], 36);
        assert_eq!(truth[35], 0);
        assert!(truth[..35].iter().all(|&d| d == UNREACHED));
    }

    #[test]
    fn color_edge_list_run() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("path.txt");
        fs::write(&input, "EdgeArray\n1 2\n2 3\n3 9\n").unwrap();

        let source = Source::from_args(
            App::Color,
            Mode::Color,
            &[input.to_string_lossy().into_owned()],
        )
        .unwrap();
        let summary = Pipeline::new(App::Color)
            .out_dir(dir.path())
            .vertices(Some(3))
            .run(&source)
            .unwrap();
        assert_eq!(summary.path, dir.path().join("path.txt.color"));

        let image = read_image(&summary.path);
        assert_eq!(image.number_of_nodes(), Some(3));
        // symmetric closure of the path
        assert_eq!(image.number_of_edges(), Some(4));
        assert_eq!(image[9], ENQUEUER_SIZE);
        assert_eq!(image.section(image[word::GROUND_TRUTH_BASE], 3), &[1, 0, 1]);
    }

    #[test]
    fn flow_grid_run() {
        let dir = TempDir::new().unwrap();
        let source = Source::FlowGrid {
            rows: 3,
            cols: 4,
            connections: 2,
        };
        let pipeline = Pipeline::new(App::Flow).out_dir(dir.path());

        let summary = pipeline.run(&source).unwrap();
        let image = read_image(&summary.path);
        assert_eq!(image.number_of_nodes(), Some(14));
        assert_eq!(image[word::START], 12);
        assert_eq!(image[9], 13);
        assert_eq!(image[10], DEFAULT_LOG_RELABEL_INTERVAL);

        let graph = pipeline.load(&source).unwrap();
        let expected: u32 = graph.adjacency(12).iter().map(|a| a.weight).sum();
        let record = image.section(image[word::VERTEX_BASE] + 12 * FLOW_VERTEX_WORDS as u32, 3);
        assert_eq!(record, &[expected, 0, 14]);
    }

    #[test]
    fn flow_dimacs_run() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("net.gr");
        fs::write(
            &input,
            "c tiny network\np max 4 5\nn 1 s\nn 4 t\na 1 2 3\na 1 3 2\na 2 4 2\na 3 4 3\na 2 3 1\n",
        )
        .unwrap();

        let source =
            Source::from_args(App::Flow, Mode::Gr, &[input.to_string_lossy().into_owned()]).unwrap();
        let summary = Pipeline::new(App::Flow)
            .out_dir(dir.path())
            .log_relabel_interval(4)
            .run(&source)
            .unwrap();

        let image = read_image(&summary.path);
        assert_eq!(image.number_of_edges(), Some(10));
        assert_eq!(image[word::START], 0);
        assert_eq!(image[9], 3);
        assert_eq!(image[10], 4);
        assert_eq!(image[11], 0x0f00);
        assert_eq!(image.section(image[word::VERTEX_BASE], 1), &[5]);
    }

    #[test]
    fn flow_on_edge_list() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("edges.txt");
        fs::write(&input, "1 2\n2 3\n").unwrap();

        let source = Source::File {
            path: input,
            format: InputFormat::EdgeList(EdgeListReader::new()),
        };
        let pipeline = Pipeline::new(App::Flow)
            .out_dir(dir.path())
            .vertices(Some(3));

        // an edge list has no terminals of its own
        assert!(matches!(
            pipeline.run(&source),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            pipeline.clone().sink(Some(0)).run(&source),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(files_in(&dir), vec!["edges.txt".to_string()]);

        let summary = pipeline.clone().sink(Some(2)).run(&source).unwrap();
        let image = read_image(&summary.path);
        assert_eq!(image.number_of_edges(), Some(4));
        assert_eq!(image[word::START], 0);
        assert_eq!(image[9], 2);

        let summary = pipeline
            .clone()
            .start(Some(1))
            .sink(Some(2))
            .run(&source)
            .unwrap();
        let image = read_image(&summary.path);
        assert_eq!(image[word::START], 1);
    }

    #[test]
    fn flow_without_sink_is_rejected_before_loading() {
        let dir = TempDir::new().unwrap();
        let source = Source::File {
            path: dir.path().join("missing.bin"),
            format: InputFormat::LatLon(LatLonReader::new()),
        };

        assert!(matches!(
            Pipeline::new(App::Flow).out_dir(dir.path()).run(&source),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn exports() {
        let dir = TempDir::new().unwrap();
        let source = Source::Grid { size: 4 };
        let pipeline = Pipeline::new(App::Sssp)
            .out_dir(dir.path())
            .export_dimacs(true)
            .export_edges(true);

        pipeline.run(&source).unwrap();
        assert_eq!(
            files_in(&dir),
            vec![
                "grid_4x4.dimacs".to_string(),
                "grid_4x4.edges".to_string(),
                "grid_4x4.sssp".to_string()
            ]
        );

        let generated = pipeline.load(&source).unwrap();
        let exported = DimacsReader::new()
            .try_read_graph_file(dir.path().join("grid_4x4.dimacs"))
            .unwrap();
        assert_eq!(exported.edges().collect::<Vec<_>>(), generated.edges().collect::<Vec<_>>());
        assert_eq!(exported.digest_sha256(), generated.digest_sha256());
    }

    #[test]
    fn missing_input() {
        let dir = TempDir::new().unwrap();
        let source = Source::File {
            path: dir.path().join("missing.gr"),
            format: InputFormat::Dimacs(DimacsReader::new()),
        };

        assert!(matches!(
            Pipeline::new(App::Sssp).out_dir(dir.path()).run(&source),
            Err(Error::Open { .. })
        ));
        assert!(files_in(&dir).is_empty());
    }

    #[test]
    fn failed_write_leaves_no_partial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.sssp");

        let result = write_atomically(&path, |writer| {
            writer.write_all(&[1, 2, 3])?;
            Err(Error::InvalidParameter("abort".into()))
        });

        assert!(result.is_err());
        assert!(files_in(&dir).is_empty());
    }
}
