use {
    axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, Method, StatusCode, Uri},
        Router,
    },
    std::{
        net::SocketAddr,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
        time::{Duration, Instant},
    },
    tokio::{net::TcpListener, time::sleep},
};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub received: Instant,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

type Responder = Arc<dyn Fn(usize, &Recorded) -> (u16, String) + Send + Sync>;
type Pace = Arc<dyn Fn(usize) -> Duration + Send + Sync>;

#[derive(Clone)]
struct Stub {
    requests: Arc<Mutex<Vec<Recorded>>>,
    respond: Responder,
    pace: Pace,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

/// HTTP server answering every request through a closure and recording it.
pub struct StubServer {
    addr: SocketAddr,
    stub: Stub,
}

impl StubServer {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(usize, &Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        Self::paced(respond, |_| Duration::ZERO).await
    }

    /// Like `start`, but holds the answer to request `n` back for `pace(n)`.
    pub async fn paced<F, P>(respond: F, pace: P) -> Self
    where
        F: Fn(usize, &Recorded) -> (u16, String) + Send + Sync + 'static,
        P: Fn(usize) -> Duration + Send + Sync + 'static,
    {
        let stub = Stub {
            requests: Arc::new(Mutex::new(Vec::new())),
            respond: Arc::new(respond),
            pace: Arc::new(pace),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(record).with_state(stub.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubServer { addr, stub }
    }

    /// Answers every request with the same status and body.
    pub async fn fixed(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_, _| (status, body.clone())).await
    }

    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.stub.requests.lock().unwrap().clone()
    }

    /// Highest number of requests that were being served at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.stub.max_in_flight.load(Ordering::SeqCst)
    }
}

async fn record(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let current = stub.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stub.max_in_flight.fetch_max(current, Ordering::SeqCst);

    let request = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(key, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                (key.to_string(), value)
            })
            .collect(),
        body: body.to_vec(),
        received: Instant::now(),
    };

    let (index, (status, body)) = {
        let mut requests = stub.requests.lock().unwrap();
        let index = requests.len();
        let answer = (stub.respond)(index, &request);
        requests.push(request);
        (index, answer)
    };

    sleep((stub.pace)(index)).await;
    stub.in_flight.fetch_sub(1, Ordering::SeqCst);

    let status = StatusCode::from_u16(status).unwrap();
    (status, body)
}

/// Accepts connections but never answers them.
pub async fn silent_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    addr.to_string()
}

/// Address nothing is listening on.
pub async fn closed_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().to_string()
}
