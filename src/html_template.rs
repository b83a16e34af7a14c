use axum::response::Html;

/// Renders the map page, injecting the Mapbox access token. With no token
/// the base tiles will not load; the overlays and legend still work.
pub fn get_map_html(mapbox_token: Option<&str>) -> Html<String> {
    let html = MAP_HTML.replace("__MAPBOX_TOKEN__", mapbox_token.unwrap_or(""));
    Html(html)
}

// HTML template for the map page. Everything data-driven comes from the
// JSON APIs; this page only draws.
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QuakeMap - Recent Earthquakes &amp; Fault Lines</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
        #map { height: 100vh; width: 100%; }
        .info {
            padding: 6px 8px;
            font: 14px/16px Arial, Helvetica, sans-serif;
            background: white;
            background: rgba(255,255,255,0.9);
            box-shadow: 0 0 15px rgba(0,0,0,0.2);
            border-radius: 5px;
        }
        .legend i {
            width: 18px;
            height: 18px;
            float: left;
            margin-right: 8px;
            opacity: 0.8;
        }
    </style>
</head>
<body>
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const ACCESS_TOKEN = "__MAPBOX_TOKEN__";
        const TILE_URL = "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";
        const ATTRIBUTION = 'Map data &copy; <a href="https://www.openstreetmap.org/">OpenStreetMap</a> contributors, ' +
            '<a href="https://creativecommons.org/licenses/by-sa/2.0/">CC-BY-SA</a>, ' +
            'Imagery &copy; <a href="https://www.mapbox.com/">Mapbox</a>';

        function baseLayer(id) {
            return L.tileLayer(TILE_URL, {
                attribution: ATTRIBUTION,
                maxZoom: 18,
                id: id,
                accessToken: ACCESS_TOKEN
            });
        }

        const satellite = baseLayer("mapbox.satellite");
        const grayscale = baseLayer("mapbox.light");
        const outdoors = baseLayer("mapbox.outdoors");

        const earthquakes = L.layerGroup();
        const faultLines = L.layerGroup();

        const map = L.map("map", {
            center: [52.128429, -122.130203],
            zoom: 4,
            layers: [satellite, earthquakes, faultLines]
        });

        L.control.layers(
            { Satellite: satellite, "Color Map": outdoors, Grayscale: grayscale },
            { Earthquakes: earthquakes, "Fault Lines": faultLines },
            { collapsed: false }
        ).addTo(map);

        async function loadMarkers() {
            const response = await fetch("/api/markers");
            const markers = await response.json();
            markers.forEach(m => {
                L.circle([m.latitude, m.longitude], {
                    fillOpacity: 0.75,
                    color: "black",
                    fillColor: m.color,
                    radius: m.radius,
                    weight: 1
                }).bindPopup(m.popup_text).addTo(earthquakes);
            });
            console.log(`Loaded ${markers.length} earthquake markers`);
        }

        async function loadFaultLines() {
            const response = await fetch("/api/plates");
            const plates = await response.json();
            L.geoJSON(plates, {
                style: { color: "red", weight: 1.5 }
            }).addTo(faultLines);
        }

        async function loadLegend() {
            const response = await fetch("/api/legend");
            const buckets = await response.json();

            const legend = L.control({ position: "bottomright" });
            legend.onAdd = function() {
                const div = L.DomUtil.create("div", "info legend");
                buckets.forEach(bucket => {
                    const range = bucket.upper_bound !== null
                        ? `${bucket.lower_bound}&ndash;${bucket.upper_bound}<br>`
                        : `${bucket.lower_bound}+`;
                    div.innerHTML += `<i style="background:${bucket.color}"></i> ${range}`;
                });
                return div;
            };
            legend.addTo(map);
        }

        loadMarkers().catch(err => console.error("Failed to load markers:", err));
        loadFaultLines().catch(err => console.error("Failed to load fault lines:", err));
        loadLegend().catch(err => console.error("Failed to load legend:", err));
    </script>
</body>
</html>"#;
