mod weather_query;
